use ferrite_mlp::{data, ActivationFunction, BinaryRule, Layer, LossType, Network};

fn main() -> ferrite_mlp::Result<()> {
    let mut network = Network::new(LossType::Mse);
    network.add_layer(Layer::new(2, 4, ActivationFunction::ReLU));
    network.add_layer(Layer::new(4, 1, ActivationFunction::Sigmoid));

    let (inputs, expected_outputs) = data::truth_table(BinaryRule::Xor);

    let learning_rate = 0.5;
    let epochs = 5000;

    for epoch in 0..epochs {
        let loss = network.train(&inputs, &expected_outputs, learning_rate)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    let outputs = network.predict(&inputs)?;
    for i in 0..inputs.rows() {
        println!("Input: {:?} -> Output: {:.4}", inputs.row(i)?, outputs.get(i, 0)?);
    }

    Ok(())
}
