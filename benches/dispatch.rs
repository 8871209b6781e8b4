//! 信封分发基准测试
//!
//! 测试信封分类和路由分发的性能

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use push_router::envelope::{Activity, ActivityCategory, Envelope, NotificationKind, ProjectRef};
use push_router::error::ImageError;
use push_router::services::{
    Collaborators, DeepLinkNavigator, Icon, IconShape, ImageLoader, NoOpPresenter, NoOpTransport,
    StaticCapability,
};
use push_router::NotificationRouter;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// 不访问网络的图片加载器
struct InstantImageLoader;

#[async_trait]
impl ImageLoader for InstantImageLoader {
    async fn fetch(&self, url: &str, circle_mask: bool) -> Result<Icon, ImageError> {
        let shape = if circle_mask {
            IconShape::Circle
        } else {
            IconShape::Square
        };
        Ok(Icon::new(url, shape, Vec::new()))
    }
}

fn collaborators() -> Collaborators {
    Collaborators {
        images: Arc::new(InstantImageLoader),
        presenter: Arc::new(NoOpPresenter),
        navigator: Arc::new(DeepLinkNavigator::new("ksr")),
        registration: Arc::new(NoOpTransport),
        capability: Arc::new(StaticCapability(false)),
    }
}

fn mixed_envelopes() -> Vec<Envelope> {
    let mut follow = Activity::new(ActivityCategory::Follow);
    follow.user_photo = Some("https://img.example.com/u.jpg".to_string());

    let mut launch = Activity::new(ActivityCategory::Launch);
    launch.project_photo = Some("https://img.example.com/p.jpg".to_string());
    launch.project_id = Some(1001);

    let mut update = Activity::new(ActivityCategory::Update);
    update.project_photo = Some("https://img.example.com/p.jpg".to_string());
    update.project_id = Some(1001);
    update.update_id = Some(7);

    vec![
        Envelope::new(1, "New follower", "Ana followed you").with_activity(follow),
        Envelope::new(2, "Launched", "A project launched").with_activity(launch),
        Envelope::new(3, "Reminder", "Ends in 48 hours").with_project(ProjectRef {
            id: Some(1001),
            photo: Some("https://img.example.com/p.jpg".to_string()),
        }),
        Envelope::new(4, "Update #7", "Shipping news").with_activity(update),
        Envelope::new(5, "Hello", "No payload"),
    ]
}

/// 信封分类基准测试
fn classify_benchmark(c: &mut Criterion) {
    let envelopes = mixed_envelopes();

    c.bench_function("classify_mixed_envelopes", |b| {
        b.iter(|| {
            for envelope in &envelopes {
                black_box(NotificationKind::classify(black_box(envelope)));
            }
        });
    });

    c.bench_function("parse_envelope_json", |b| {
        let line = serde_json::to_string(&envelopes[1]).unwrap();
        b.iter(|| {
            let envelope: Envelope = serde_json::from_str(black_box(&line)).unwrap();
            black_box(envelope)
        });
    });
}

/// 路由分发基准测试
fn dispatch_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let router = {
        let _guard = rt.enter();
        NotificationRouter::builder(collaborators())
            .with_default_subscriptions()
            .build()
            .unwrap()
    };
    let envelopes = mixed_envelopes();

    c.bench_function("ingest_and_wait_idle", |b| {
        b.to_async(&rt).iter(|| async {
            for envelope in &envelopes {
                router.ingest(envelope.clone());
            }
            router.wait_idle().await;
        });
    });
}

criterion_group!(benches, classify_benchmark, dispatch_benchmark);
criterion_main!(benches);
