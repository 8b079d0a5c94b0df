//! Criterion benchmarks for stunting-assist.
//!
//! Covers the per-request hot paths:
//! - Text analysis of chat messages
//! - Bag-of-words vectorization and the dense forward pass
//! - Feature engineering and preprocessing for the stunting model

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use stunting_assist::analysis::analyzer::{Analyzer, ChatAnalyzer};
use stunting_assist::ml::{
    Activation, BagOfWordsVectorizer, Cell, Classifier, ColumnTransformer, DenseLayer,
    DenseNetwork, Record, TransformStep,
};
use stunting_assist::stunting::engineer;

/// Generate a vocabulary of health-related words.
fn generate_vocabulary() -> Vec<String> {
    let words = [
        "stunting", "baby", "child", "food", "nutrition", "growth", "height", "weight",
        "protein", "milk", "breastfeeding", "vitamin", "mother", "doctor", "clinic",
        "meal", "vegetable", "fruit", "egg", "fish", "age", "month", "year", "sign",
        "symptom", "prevent", "cause", "risk", "hello", "thank",
    ];
    words.iter().map(|w| w.to_string()).collect()
}

/// Generate chat messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    let templates = [
        "What foods help babies avoid stunting?",
        "How much protein does a child need every day?",
        "Hello, can you tell me the signs of stunting?",
        "My baby's weight isn't growing, what should I do?",
        "Which vegetables and fruits are good for mothers?",
    ];
    (0..count)
        .map(|i| templates[i % templates.len()].to_string())
        .collect()
}

fn dense_network(input_dim: usize, hidden: usize, outputs: usize) -> DenseNetwork {
    let hidden_layer = DenseLayer::new(
        (0..input_dim)
            .map(|i| (0..hidden).map(|j| ((i * 7 + j) % 11) as f32 / 10.0 - 0.5).collect())
            .collect(),
        vec![0.0; hidden],
        Activation::Relu,
    );
    let output_layer = DenseLayer::new(
        (0..hidden)
            .map(|i| (0..outputs).map(|j| ((i + j * 3) % 5) as f32 / 5.0 - 0.4).collect())
            .collect(),
        vec![0.0; outputs],
        Activation::Softmax,
    );
    DenseNetwork::new(input_dim, vec![hidden_layer, output_layer]).unwrap()
}

/// Benchmark chat message analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");
    let analyzer = ChatAnalyzer::new(generate_vocabulary()).unwrap();
    let messages = generate_messages(100);

    group.bench_function("analyze_single_message", |b| {
        b.iter(|| {
            let tokens: Vec<_> = analyzer.analyze(black_box(&messages[0])).unwrap().collect();
            black_box(tokens)
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let tokens: Vec<_> = analyzer.analyze(black_box(message)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark vectorization and classification.
fn bench_chat_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("chat_inference");
    let vocabulary = generate_vocabulary();
    let analyzer = Arc::new(ChatAnalyzer::new(vocabulary.clone()).unwrap());
    let vectorizer = BagOfWordsVectorizer::new(vocabulary, analyzer);
    let network = dense_network(vectorizer.vocabulary_size(), 128, 12);
    let messages = generate_messages(100);

    group.bench_function("bag_of_words", |b| {
        b.iter(|| black_box(vectorizer.transform(black_box(&messages[0])).unwrap()))
    });

    let features = vectorizer.transform(&messages[0]).unwrap();
    group.bench_function("dense_forward_pass", |b| {
        b.iter(|| black_box(network.predict(black_box(&features)).unwrap()))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("vectorize_and_predict_batch", |b| {
        b.iter(|| {
            for message in &messages {
                let features = vectorizer.transform(message).unwrap();
                black_box(network.predict(&features).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark stunting feature engineering and preprocessing.
fn bench_stunting_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("stunting_features");
    let records: Vec<Record> = (0..100)
        .map(|i| {
            Record::new()
                .with("Age", Cell::Number((12 + i % 24) as f64))
                .with("Sex", Cell::Text(if i % 2 == 0 { "M" } else { "F" }.into()))
                .with("Body Length", Cell::Number(70.0 + (i % 20) as f64))
                .with("Body Weight", Cell::Number(8.0 + (i % 6) as f64 * 0.5))
        })
        .collect();
    let transformer = ColumnTransformer::new(vec![
        TransformStep::StandardScaler {
            columns: vec!["Age".into(), "BMI".into()],
            mean: vec![24.0, 15.0],
            scale: vec![6.0, 1.5],
        },
        TransformStep::OneHot {
            columns: vec!["Sex".into()],
            categories: vec![vec![Cell::Text("F".into()), Cell::Text("M".into())]],
            handle_unknown: Default::default(),
        },
        TransformStep::Passthrough {
            columns: vec![
                "Height_for_Age_Z".into(),
                "Weight_for_Age_Z".into(),
                "Weight_for_Height_Z".into(),
            ],
        },
    ])
    .unwrap();

    group.throughput(Throughput::Elements(100));
    group.bench_function("engineer_and_transform", |b| {
        b.iter(|| {
            let (rows, _) = engineer(black_box(&records)).unwrap();
            black_box(transformer.transform(&rows).unwrap())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_analysis,
    bench_chat_inference,
    bench_stunting_features
);
criterion_main!(benches);
