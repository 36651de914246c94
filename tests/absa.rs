mod common;

use common::*;
use rust_absa::pipelines::absa::{AbsaOutput, AbsaPipeline, AspectResult, NO_ASPECTS_MESSAGE};
use rust_absa::pipelines::aliases::AliasTable;
use rust_absa::pipelines::sentiment::AspectSentiment;
use rust_absa::AbsaError;
use std::sync::atomic::Ordering;

#[test]
fn food_and_service_review() -> anyhow::Result<()> {
    let pipeline = restaurant_pipeline();

    let output = pipeline.predict(REVIEW)?;

    assert_eq!(
        output,
        AbsaOutput::Aspects(vec![
            AspectResult {
                aspect: "jedzenie".to_string(),
                sentiment: AspectSentiment::Positive,
            },
            AspectResult {
                aspect: "obsługa".to_string(),
                sentiment: AspectSentiment::Negative,
            },
        ])
    );
    assert_eq!(
        pipeline.analyze(REVIEW),
        "🧩 Jedzenie → **pozytywny**\n🧩 Obsługa → **negatywny**"
    );
    Ok(())
}

#[test]
fn classifier_receives_sentence_and_lowercased_aspect() -> anyhow::Result<()> {
    let classifier = LexiconClassifier::default();
    let inputs = classifier.inputs.clone();
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review("Kelner był miły.", "The Waiter was nice."),
        KeywordExtractor::new(&["waiter"], &[]),
        classifier,
        AliasTable::restaurant(),
    );

    pipeline.predict("Kelner był miły.")?;

    assert_eq!(
        *inputs.lock().unwrap(),
        vec![("The Waiter was nice.".to_string(), "waiter".to_string())]
    );
    Ok(())
}

#[test]
fn aliases_to_the_same_category_keep_the_first_sentiment() -> anyhow::Result<()> {
    let review = "Kelner i obsługa byli niemili, ale menedżer był uprzejmy.";
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(
            review,
            "The waiter and the staff were unkind, but the manager was polite.",
        ),
        KeywordExtractor::new(&["waiter", "staff", "manager"], &[]),
        LexiconClassifier::default()
            .with("waiter", 0)
            .with("staff", 0)
            .with("manager", 2),
        AliasTable::restaurant(),
    );

    let output = pipeline.predict(review)?;

    // "manager" sorts first
    assert_eq!(
        output.aspects(),
        &[AspectResult {
            aspect: "obsługa".to_string(),
            sentiment: AspectSentiment::Positive,
        }]
    );
    assert_eq!(pipeline.analyze(review), "🧩 Obsługa → **pozytywny**");
    Ok(())
}

#[test]
fn unknown_aspects_are_translated() -> anyhow::Result<()> {
    let review = "Taras był uroczy.";
    let translator = PhraseBookTranslator::default()
        .with_review(review, "The garden terrace was lovely.")
        .with_aspect("garden terrace", "Taras Ogrodowy");
    let pipeline = AbsaPipeline::new(
        translator,
        KeywordExtractor::new(&["garden"], &["terrace"]),
        LexiconClassifier::default().with("garden terrace", 2),
        AliasTable::restaurant(),
    );

    let output = pipeline.predict(review)?;

    assert_eq!(
        output.aspects(),
        &[AspectResult {
            aspect: "taras ogrodowy".to_string(),
            sentiment: AspectSentiment::Positive,
        }]
    );
    assert_eq!(pipeline.analyze(review), "🧩 Taras ogrodowy → **pozytywny**");
    Ok(())
}

#[test]
fn review_without_aspects() -> anyhow::Result<()> {
    let review = "Wszystko było w porządku.";
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(review, "Everything was fine."),
        KeywordExtractor::new(&["pizza"], &[]),
        LexiconClassifier::default(),
        AliasTable::restaurant(),
    );

    assert_eq!(pipeline.predict(review)?, AbsaOutput::NoAspects);
    assert_eq!(pipeline.analyze(review), NO_ASPECTS_MESSAGE);
    assert_eq!(pipeline.analyze(review), "Nie wykryto żadnych aspektów.");
    Ok(())
}

#[test]
fn blank_review_skips_the_models() {
    let translator = PhraseBookTranslator::default();
    let calls = translator.calls.clone();
    let pipeline = AbsaPipeline::new(
        translator,
        BrokenExtractor,
        LexiconClassifier::default(),
        AliasTable::restaurant(),
    );

    assert_eq!(pipeline.analyze("  \n "), NO_ASPECTS_MESSAGE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn translation_failure_is_reported() {
    let pipeline = AbsaPipeline::new(
        UnavailableTranslator,
        KeywordExtractor::new(&["pizza"], &[]),
        LexiconClassifier::default(),
        AliasTable::restaurant(),
    );

    assert!(matches!(
        pipeline.predict(REVIEW),
        Err(AbsaError::TranslationError(_))
    ));
    assert_eq!(
        pipeline.analyze(REVIEW),
        "Błąd: Translation error: translation model unavailable"
    );
}

#[test]
fn extraction_failure_is_reported() {
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(REVIEW, REVIEW_EN),
        BrokenExtractor,
        LexiconClassifier::default(),
        AliasTable::restaurant(),
    );

    assert!(matches!(
        pipeline.predict(REVIEW),
        Err(AbsaError::ExtractionError(_))
    ));
    assert!(pipeline.analyze(REVIEW).starts_with("Błąd: "));
}

#[test]
fn invalid_class_aborts_without_partial_output() {
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(REVIEW, REVIEW_EN),
        KeywordExtractor::new(&["pizza", "waiter"], &[]),
        LexiconClassifier::default().with("pizza", 2).with("waiter", 7),
        AliasTable::restaurant(),
    );

    let rendered = pipeline.analyze(REVIEW);

    assert!(matches!(
        pipeline.predict(REVIEW),
        Err(AbsaError::ClassificationError(_))
    ));
    assert!(rendered.starts_with("Błąd: "));
    assert!(!rendered.contains("Jedzenie"));
}

#[test]
fn model_panic_is_reported_and_pipeline_stays_usable() -> anyhow::Result<()> {
    let pipeline = panicking_pipeline();

    assert!(matches!(
        pipeline.predict(REVIEW),
        Err(AbsaError::ModelPanic(_))
    ));
    assert_eq!(
        pipeline.analyze(REVIEW),
        "Błąd: Model failure: index out of range for the label map"
    );
    assert_eq!(pipeline.analyze(FOOD_REVIEW), "🧩 Jedzenie → **pozytywny**");
    Ok(())
}

#[test]
fn failed_fallback_translation_aborts() {
    let review = "Taras był uroczy.";
    let pipeline = AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(review, "The terrace was lovely."),
        KeywordExtractor::new(&["terrace"], &[]),
        LexiconClassifier::default(),
        AliasTable::restaurant(),
    );

    assert!(matches!(
        pipeline.predict(review),
        Err(AbsaError::TranslationError(_))
    ));
}

#[test]
fn analysis_is_deterministic() {
    let pipeline = restaurant_pipeline();
    let first = pipeline.analyze(REVIEW);
    let second = pipeline.analyze(REVIEW);
    assert_eq!(first, second);
}

#[test]
fn progress_is_reported() -> anyhow::Result<()> {
    let pipeline = restaurant_pipeline();
    let mut reports = vec![];

    pipeline.predict_with_progress(REVIEW, &mut |progress: f32| reports.push(progress))?;

    let expected: [f32; 5] = [0.0, 0.3, 0.4, 0.7, 1.0];
    assert_eq!(reports.len(), expected.len());
    for (reported, expected) in reports.iter().zip(expected.iter()) {
        assert!((reported - expected).abs() < 1e-6);
    }
    Ok(())
}
