mod common;

use common::{write_model_dir, CASH, DEBT, N_FEATURES};
use solvency_core::{FeatureError, FeatureVector, Label};
use solvency_data::{ReferenceDataset, DEFAULT_LABEL_COLUMN};
use solvency_serving::{
    load_artifacts, InferencePipeline, PipelineConfig, PipelineContext, ServingError,
};

fn load(model: &common::ModelDir) -> (InferencePipeline, ReferenceDataset) {
    let config = PipelineConfig::builder().model_dir(model.path()).build();
    let context = PipelineContext::load(&config).unwrap();
    let dataset = ReferenceDataset::open(config.dataset_path().unwrap(), DEFAULT_LABEL_COLUMN)
        .unwrap();
    context.check_dataset_schema(&dataset).unwrap();
    (InferencePipeline::new(context), dataset)
}

#[test]
fn test_known_examples_reproduce_their_labels() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    let bankrupt = dataset.first_with_label(Label::Bankrupt).unwrap();
    let healthy = dataset.first_with_label(Label::NotBankrupt).unwrap();

    assert_eq!(pipeline.predict(&bankrupt).unwrap(), Label::Bankrupt);
    assert_eq!(pipeline.predict(&healthy).unwrap(), Label::NotBankrupt);

    for (values, label) in dataset.rows() {
        assert_eq!(pipeline.predict_values(values).unwrap(), label);
    }
}

#[test]
fn test_prediction_is_deterministic() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    for i in 0..dataset.len() {
        let v = dataset.row_vector(i).unwrap();
        let first = pipeline.predict(&v).unwrap();
        let second = pipeline.predict(&v).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first.as_u8(), 0 | 1));
    }
}

#[test]
fn test_permuted_vector_gives_same_result() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    let original = dataset.first_with_label(Label::Bankrupt).unwrap();
    let mut pairs: Vec<(&str, f64)> = original.iter().collect();
    pairs.reverse();
    let reversed = FeatureVector::from_pairs(pairs);
    assert_ne!(
        original.names().next(),
        reversed.names().next(),
        "reverse should change entry order"
    );

    assert_eq!(
        pipeline.predict(&original).unwrap(),
        pipeline.predict(&reversed).unwrap()
    );
}

#[test]
fn test_mean_vector_is_accepted() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    let means = dataset.mean_vector();
    assert_eq!(means.len(), N_FEATURES);
    assert!(pipeline.predict(&means).is_ok());
}

#[test]
fn test_missing_feature_is_invalid_input() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    let mut v = dataset.mean_vector();
    let dropped = pipeline.context().schema().names()[CASH].clone();
    v.remove(&dropped).unwrap();

    let err = pipeline.predict(&v).unwrap_err();
    assert!(err.is_client_error());
    match err {
        ServingError::InvalidInput(FeatureError::MissingFeature { name }) => {
            assert_eq!(name, dropped)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_and_non_finite_inputs_are_rejected() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);

    let mut extra = dataset.mean_vector();
    extra.set("Altman Z-score", 1.0);
    assert!(matches!(
        pipeline.predict(&extra),
        Err(ServingError::InvalidInput(FeatureError::UnknownFeature { .. }))
    ));

    let mut nan = dataset.mean_vector();
    let debt = pipeline.context().schema().names()[DEBT].clone();
    nan.set(debt, f64::NAN);
    assert!(matches!(
        pipeline.predict(&nan),
        Err(ServingError::InvalidInput(FeatureError::NonFiniteValue { .. }))
    ));

    assert!(matches!(
        pipeline.predict(&FeatureVector::new()),
        Err(ServingError::InvalidInput(FeatureError::MissingFeature { .. }))
    ));
}

#[test]
fn test_nonexistent_artifact_is_load_error() {
    let model = write_model_dir();
    std::fs::remove_file(model.classifier()).unwrap();

    let err = load_artifacts(model.scaler(), model.classifier()).unwrap_err();
    assert!(matches!(err, ServingError::ArtifactLoadError(_)));
    assert!(err.is_fatal());

    let config = PipelineConfig::builder().model_dir(model.path()).build();
    let result = PipelineContext::load(&config);
    assert!(matches!(result, Err(ServingError::ArtifactLoadError(_))));
}

#[test]
fn test_mismatched_artifacts_are_rejected() {
    let model = write_model_dir();
    let mut names = common::feature_names();
    names.swap(0, 1);
    std::fs::write(model.classifier(), common::tree_json(&names).to_string()).unwrap();

    let err = PipelineContext::from_paths(model.scaler(), model.classifier()).unwrap_err();
    assert!(matches!(err, ServingError::ArtifactLoadError(_)));
}

#[test]
fn test_expected_feature_count_is_enforced() {
    let model = write_model_dir();
    let config = PipelineConfig::builder()
        .model_dir(model.path())
        .expected_features(Some(30))
        .build();
    assert!(matches!(
        PipelineContext::load(&config),
        Err(ServingError::ArtifactLoadError(_))
    ));
}

#[test]
fn test_dataset_header_mismatch_is_reported() {
    let model = write_model_dir();
    let mut names = common::feature_names();
    names.swap(DEBT, CASH);
    std::fs::write(model.dataset(), common::dataset_csv(&names)).unwrap();

    let config = PipelineConfig::builder().model_dir(model.path()).build();
    let context = PipelineContext::load(&config).unwrap();
    let dataset = ReferenceDataset::open(model.dataset(), DEFAULT_LABEL_COLUMN).unwrap();
    assert!(matches!(
        context.check_dataset_schema(&dataset),
        Err(ServingError::SchemaMismatch(_))
    ));
}

#[test]
fn test_concurrent_predictions_share_one_context() {
    let model = write_model_dir();
    let (pipeline, dataset) = load(&model);
    let bankrupt = dataset.first_with_label(Label::Bankrupt).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            let v = bankrupt.clone();
            std::thread::spawn(move || pipeline.predict(&v).unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), Label::Bankrupt);
    }
}
