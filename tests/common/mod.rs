//! 集成测试共用的测试替身和信封样例

#![allow(dead_code)]

use async_trait::async_trait;
use push_router::envelope::{Activity, ActivityCategory, Envelope, ProjectRef};
use push_router::error::{ImageError, PresentationError, RegistrationError};
use push_router::services::{
    Collaborators, DeepLinkNavigator, Icon, IconShape, ImageLoader, Notification,
    NotificationPresenter, RegistrationTransport, StaticCapability,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 记录所有展示调用的展示器
#[derive(Default)]
pub struct RecordingPresenter {
    presented: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingPresenter {
    pub fn failing() -> Self {
        Self {
            presented: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn presented(&self) -> Vec<Notification> {
        self.presented.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPresenter for RecordingPresenter {
    async fn present(&self, notification: &Notification) -> Result<(), PresentationError> {
        self.presented.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(PresentationError::PresentError("模拟展示失败".to_string()));
        }
        Ok(())
    }
}

/// 返回固定图标或固定失败的图片加载器
#[derive(Default)]
pub struct StubImageLoader {
    fail: bool,
    requests: Mutex<Vec<(String, bool)>>,
}

impl StubImageLoader {
    pub fn failing() -> Self {
        Self {
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageLoader for StubImageLoader {
    async fn fetch(&self, url: &str, circle_mask: bool) -> Result<Icon, ImageError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), circle_mask));

        if self.fail {
            return Err(ImageError::BadStatus {
                url: url.to_string(),
                status: 500,
            });
        }

        let shape = if circle_mask {
            IconShape::Circle
        } else {
            IconShape::Square
        };
        Ok(Icon::new(url, shape, vec![0xFF, 0xD8]))
    }
}

/// 统计调用次数的注册传输
#[derive(Default)]
pub struct CountingTransport {
    pub registers: AtomicUsize,
    pub unregisters: AtomicUsize,
    fail: bool,
}

impl CountingTransport {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn registers(&self) -> usize {
        self.registers.load(Ordering::SeqCst)
    }

    pub fn unregisters(&self) -> usize {
        self.unregisters.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrationTransport for CountingTransport {
    async fn register(&self) -> Result<(), RegistrationError> {
        self.registers.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RegistrationError::Rejected { status: 500 });
        }
        Ok(())
    }

    async fn unregister(&self) -> Result<(), RegistrationError> {
        self.unregisters.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RegistrationError::Rejected { status: 500 });
        }
        Ok(())
    }
}

/// 测试夹具：协作服务及其测试替身
pub struct Harness {
    pub presenter: Arc<RecordingPresenter>,
    pub images: Arc<StubImageLoader>,
    pub transport: Arc<CountingTransport>,
    pub collaborators: Collaborators,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(
            RecordingPresenter::default(),
            StubImageLoader::default(),
            CountingTransport::default(),
            true,
        )
    }

    pub fn with(
        presenter: RecordingPresenter,
        images: StubImageLoader,
        transport: CountingTransport,
        capability_available: bool,
    ) -> Self {
        let presenter = Arc::new(presenter);
        let images = Arc::new(images);
        let transport = Arc::new(transport);
        let collaborators = Collaborators {
            images: images.clone(),
            presenter: presenter.clone(),
            navigator: Arc::new(DeepLinkNavigator::new("ksr")),
            registration: transport.clone(),
            capability: Arc::new(StaticCapability(capability_available)),
        };

        Self {
            presenter,
            images,
            transport,
            collaborators,
        }
    }
}

pub const USER_PHOTO: &str = "https://img.example.com/users/ada.jpg";
pub const PROJECT_PHOTO: &str = "https://img.example.com/projects/robot.jpg";
pub const PROJECT_ID: u64 = 1001;

pub fn friend_follow(signature: i32) -> Envelope {
    let mut activity = Activity::new(ActivityCategory::Follow);
    activity.user_photo = Some(USER_PHOTO.to_string());
    Envelope::new(signature, "New follower", "Ada is now following you").with_activity(activity)
}

pub fn project_activity(signature: i32) -> Envelope {
    let mut activity = Activity::new(ActivityCategory::Success);
    activity.project_photo = Some(PROJECT_PHOTO.to_string());
    activity.project_id = Some(PROJECT_ID);
    Envelope::new(signature, "Funded!", "Robot Kit was successfully funded").with_activity(activity)
}

pub fn project_reminder(signature: i32) -> Envelope {
    Envelope::new(signature, "Ending soon", "Robot Kit ends in 48 hours").with_project(ProjectRef {
        id: Some(PROJECT_ID),
        photo: Some(PROJECT_PHOTO.to_string()),
    })
}

pub fn project_update(signature: i32) -> Envelope {
    let mut activity = Activity::new(ActivityCategory::Update);
    activity.project_photo = Some(PROJECT_PHOTO.to_string());
    activity.project_id = Some(PROJECT_ID);
    activity.update_id = Some(7);
    Envelope::new(signature, "Update #7", "Shipping has started").with_activity(activity)
}

pub fn unclassified(signature: i32) -> Envelope {
    Envelope::new(signature, "Hello", "Nothing to route")
}
