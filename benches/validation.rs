#![allow(clippy::unwrap_used)]
//! Benchmarks for form validation, comment rendering and config parsing

#![allow(missing_docs)]

use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use folio::config::FolioConfig;
use folio::forms::{Comment, CommentList, Fields, FormKind, is_valid_email, validate};
use std::hint::black_box;

fn bench_validate_contact(c: &mut Criterion) {
    let valid = Fields {
        name: "Jo",
        email: "jo@example.com",
        message: "Hello, I would like to talk about a project.",
    };
    let invalid = Fields {
        name: "   ",
        email: "not-an-email",
        message: "",
    };

    c.bench_function("validate_contact_valid", |b| {
        b.iter(|| black_box(validate(black_box(&valid), FormKind::Contact)));
    });
    c.bench_function("validate_contact_invalid", |b| {
        b.iter(|| black_box(validate(black_box(&invalid), FormKind::Contact)));
    });
}

fn bench_email_pattern(c: &mut Criterion) {
    let long_local = format!("{}@example.com", "a".repeat(256));

    c.bench_function("email_pattern_long", |b| {
        b.iter(|| black_box(is_valid_email(black_box(&long_local))));
    });
}

fn bench_comment_rendering(c: &mut Criterion) {
    let now = Utc::now();
    let mut comments = CommentList::seeded();
    for i in 0..100 {
        comments.prepend(Comment::new(
            format!("Visitor {i}"),
            "<b>Great</b> work & nice \"gallery\"".to_string(),
            None,
            now,
        ));
    }

    c.bench_function("render_103_comments", |b| {
        b.iter(|| {
            for comment in black_box(&comments) {
                black_box(comment.render_message());
                black_box(comment.relative_label(now));
            }
        });
    });
}

fn bench_config_deserialization(c: &mut Criterion) {
    let json = serde_json::to_string(&FolioConfig::default()).unwrap();

    c.bench_function("config_deserialize", |b| {
        b.iter(|| {
            let config: FolioConfig = serde_json::from_str(black_box(&json)).unwrap();
            black_box(config);
        });
    });
}

criterion_group!(
    benches,
    bench_validate_contact,
    bench_email_pattern,
    bench_comment_rendering,
    bench_config_deserialization
);
criterion_main!(benches);
