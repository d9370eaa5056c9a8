//! Tests for the network container: sequential forward pass, reverse
//! backward pass, loss reporting and end-to-end convergence on XOR.

use approx::assert_relative_eq;
use ferrite_mlp::{
    accuracy, data, ActivationFunction, BinaryRule, Error, GradientRule, Layer, LossType,
    Matrix, Network, NetworkSpec,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

/// 2 → 4 ReLU → 1 Sigmoid with fixed, asymmetric starting parameters.
fn xor_network(rule: GradientRule) -> Network {
    let hidden = Layer::from_parameters(
        m(vec![vec![0.5, -0.6, 0.9, -0.3], vec![-0.4, 0.7, 0.8, -0.5]]),
        m(vec![vec![0.1, 0.1, -0.2, 0.05]]),
        ActivationFunction::ReLU,
    )
    .unwrap()
    .with_gradient_rule(rule);
    let output = Layer::from_parameters(
        m(vec![vec![0.7], vec![0.8], vec![-0.9], vec![0.3]]),
        m(vec![vec![0.0]]),
        ActivationFunction::Sigmoid,
    )
    .unwrap()
    .with_gradient_rule(rule);

    let mut network = Network::new(LossType::Mse);
    network.add_layer(hidden);
    network.add_layer(output);
    network
}

fn assert_learns_xor(rule: GradientRule) {
    let mut network = xor_network(rule);
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);

    let mut loss = f64::INFINITY;
    for _ in 0..1000 {
        loss = network.train(&inputs, &labels, 0.5).unwrap();
    }
    assert!(loss < 0.05, "loss after 1000 steps: {loss}");

    let predictions = network.predict(&inputs).unwrap();
    assert_eq!(accuracy(&predictions, &labels, 0.5).unwrap(), 1.0);
    for i in 0..4 {
        let p = predictions.get(i, 0).unwrap();
        let expected = labels.get(i, 0).unwrap();
        assert_eq!(p.round(), expected, "row {i} predicted {p}");
    }
}

// ============================================================================
// Forward
// ============================================================================

#[test]
fn forward_folds_layers_in_order() {
    let mut network = Network::new(LossType::Mse);
    network.add_layer(
        Layer::from_parameters(
            m(vec![vec![1.0, -1.0], vec![1.0, -1.0]]),
            m(vec![vec![0.0, 0.0]]),
            ActivationFunction::ReLU,
        )
        .unwrap(),
    );
    network.add_layer(
        Layer::from_parameters(m(vec![vec![2.0], vec![3.0]]), m(vec![vec![1.0]]), ActivationFunction::Identity)
            .unwrap(),
    );

    // hidden = relu([3, -3]) = [3, 0]; output = 3*2 + 0*3 + 1
    let out = network.forward(&m(vec![vec![1.0, 2.0]])).unwrap();
    assert_eq!(out, m(vec![vec![7.0]]));
}

#[test]
fn empty_network_forward_returns_input() {
    let mut network = Network::new(LossType::Mse);
    let input = m(vec![vec![1.0, 2.0]]);
    assert_eq!(network.forward(&input).unwrap(), input);
}

#[test]
fn misaligned_layers_fail_on_first_forward() {
    let mut network = Network::new(LossType::Mse);
    network.add_layer(Layer::new(2, 3, ActivationFunction::ReLU));
    network.add_layer(Layer::new(4, 1, ActivationFunction::Sigmoid));
    assert_eq!(network.layers().len(), 2);

    let result = network.forward(&m(vec![vec![1.0, 0.0]]));
    assert!(matches!(result, Err(Error::ShapeMismatch { op: "dot", .. })));
}

#[test]
fn predict_is_repeatable_without_training() {
    let mut network = xor_network(GradientRule::Textbook);
    let (inputs, _) = data::truth_table(BinaryRule::Xor);
    let first = network.predict(&inputs).unwrap();
    let second = network.predict(&inputs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn predict_replaces_the_batch_seen_by_backward() {
    let mut network = xor_network(GradientRule::Textbook);
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);
    network.forward(&inputs).unwrap();

    let pair = m(vec![vec![0.0, 1.0], vec![1.0, 1.0]]);
    let pair_labels = m(vec![vec![1.0], vec![0.0]]);
    let predicted = network.predict(&pair).unwrap();
    assert_eq!(predicted.shape(), (2, 1));

    // the 4-row batch from `forward` is gone
    let stale = network.backward(&labels, 0.5);
    assert!(matches!(stale, Err(Error::ShapeMismatch { .. })));

    let expected_loss = LossType::Mse.calculate(&predicted, &pair_labels).unwrap();
    let reported = network.backward(&pair_labels, 0.5).unwrap();
    assert_relative_eq!(reported, expected_loss);

    assert!(matches!(
        network.backward(&labels, 0.5),
        Err(Error::ShapeMismatch { .. })
    ));
}

// ============================================================================
// Backward
// ============================================================================

#[test]
fn backward_on_empty_network_fails() {
    let mut network = Network::new(LossType::Mse);
    let result = network.backward(&m(vec![vec![1.0]]), 0.1);
    assert!(matches!(result, Err(Error::EmptyNetwork)));
}

#[test]
fn backward_before_forward_fails() {
    let mut network = xor_network(GradientRule::Textbook);
    let result = network.backward(&m(vec![vec![1.0]]), 0.1);
    assert!(matches!(result, Err(Error::MissingForwardPass)));
}

#[test]
fn backward_reports_loss_from_before_the_update() {
    let mut network = xor_network(GradientRule::Textbook);
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);

    let before = network.forward(&inputs).unwrap();
    let expected_loss = LossType::Mse.calculate(&before, &labels).unwrap();
    let reported = network.backward(&labels, 0.5).unwrap();
    assert_relative_eq!(reported, expected_loss);

    let after = network.predict(&inputs).unwrap();
    let new_loss = LossType::Mse.calculate(&after, &labels).unwrap();
    assert!(new_loss < reported);
}

#[test]
fn backward_updates_every_layer() {
    let mut network = xor_network(GradientRule::Textbook);
    let before: Vec<Matrix> = network.layers().iter().map(|l| l.weights().clone()).collect();
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);
    network.train(&inputs, &labels, 0.5).unwrap();

    for (layer, old) in network.layers().iter().zip(&before) {
        assert_ne!(layer.weights(), old);
        assert!(layer.last_local_gradient().is_some());
    }
}

#[test]
fn mismatched_labels_fail_without_touching_parameters() {
    let mut network = xor_network(GradientRule::Textbook);
    let before: Vec<Matrix> = network.layers().iter().map(|l| l.weights().clone()).collect();
    let (inputs, _) = data::truth_table(BinaryRule::Xor);

    let result = network.train(&inputs, &Matrix::zeros(4, 2), 0.5);
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    for (layer, old) in network.layers().iter().zip(&before) {
        assert_eq!(layer.weights(), old);
    }
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn learns_xor_with_textbook_gradients() {
    assert_learns_xor(GradientRule::Textbook);
}

#[test]
fn learns_xor_with_eager_gradients() {
    assert_learns_xor(GradientRule::Eager);
}

#[test]
fn learns_xor_from_seeded_spec_build() {
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);

    // some random starts leave every ReLU unit dead; one good seed is enough
    let converged = (0..16u64).find(|&seed| {
        let mut network = NetworkSpec::default()
            .build(&mut StdRng::seed_from_u64(seed))
            .unwrap();
        let mut loss = f64::INFINITY;
        for _ in 0..2000 {
            loss = network.train(&inputs, &labels, 0.5).unwrap();
        }
        let predictions = network.predict(&inputs).unwrap();
        loss < 0.05 && accuracy(&predictions, &labels, 0.5).unwrap() == 1.0
    });
    assert!(converged.is_some(), "no seed in 0..16 learned XOR");
}

#[test]
fn loss_decreases_over_training() {
    let mut network = xor_network(GradientRule::Textbook);
    let (inputs, labels) = data::truth_table(BinaryRule::Xor);
    let first = network.train(&inputs, &labels, 0.5).unwrap();
    let mut last = first;
    for _ in 0..200 {
        last = network.train(&inputs, &labels, 0.5).unwrap();
    }
    assert!(last < first, "first {first}, last {last}");
}

// ============================================================================
// Building from a spec
// ============================================================================

#[test]
fn spec_build_with_same_seed_is_reproducible() {
    let spec = NetworkSpec::default();
    let mut a = spec.build(&mut StdRng::seed_from_u64(9)).unwrap();
    let mut b = spec.build(&mut StdRng::seed_from_u64(9)).unwrap();
    let (inputs, _) = data::truth_table(BinaryRule::Xor);
    assert_eq!(a.predict(&inputs).unwrap(), b.predict(&inputs).unwrap());
}

#[test]
fn spec_build_applies_gradient_rule_to_every_layer() {
    let spec = NetworkSpec { gradient_rule: GradientRule::Eager, ..NetworkSpec::default() };
    let network = spec.build(&mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(network.loss(), LossType::Mse);
    assert!(network
        .layers()
        .iter()
        .all(|l| l.gradient_rule() == GradientRule::Eager));
    assert_eq!(network.layers()[0].activation(), ActivationFunction::ReLU);
    assert_eq!(network.layers()[1].activation(), ActivationFunction::Sigmoid);
}
