//! 图片加载模块
//!
//! 定义图片加载接口和基于HTTP的实现

use crate::config::types::ImageConfig;
use crate::error::ImageError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// 大图标的形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconShape {
    /// 原始比例
    Original,
    /// 裁剪为正方形
    Square,
    /// 正方形并应用圆形遮罩
    Circle,
}

/// 加载后的图标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    /// 图片来源地址
    pub source_url: String,
    /// 图标形状
    pub shape: IconShape,
    /// 内容类型
    pub content_type: Option<String>,
    /// 图片字节数
    pub byte_len: usize,
    /// 图片数据
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Icon {
    /// 创建图标
    pub fn new(source_url: impl Into<String>, shape: IconShape, bytes: Vec<u8>) -> Self {
        Self {
            source_url: source_url.into(),
            shape,
            content_type: None,
            byte_len: bytes.len(),
            bytes,
        }
    }

    /// 是否应用了圆形遮罩
    pub fn is_circular(&self) -> bool {
        self.shape == IconShape::Circle
    }
}

/// 图片加载器trait
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// 加载图片
    ///
    /// # 参数
    /// * `url` - 图片地址
    /// * `circle_mask` - 是否应用圆形遮罩
    ///
    /// # 返回
    /// * `Result<Icon, ImageError>` - 加载的图标
    async fn fetch(&self, url: &str, circle_mask: bool) -> Result<Icon, ImageError>;
}

/// 基于HTTP的图片加载器
///
/// 只负责下载和校验，像素级的裁剪和遮罩由展示层按 `IconShape` 完成
pub struct HttpImageLoader {
    /// HTTP客户端
    client: Client,
    /// 图片最大字节数
    max_bytes: usize,
    /// 是否裁剪为正方形
    crop_square: bool,
}

impl HttpImageLoader {
    /// 创建新的图片加载器
    pub fn new(config: &ImageConfig) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
            crop_square: config.crop_square,
        })
    }

    fn shape_for(&self, circle_mask: bool) -> IconShape {
        if circle_mask {
            IconShape::Circle
        } else if self.crop_square {
            IconShape::Square
        } else {
            IconShape::Original
        }
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn fetch(&self, url: &str, circle_mask: bool) -> Result<Icon, ImageError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ImageError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!("加载图片: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if let Some(ref content_type) = content_type {
            if !content_type.starts_with("image/") {
                return Err(ImageError::NotAnImage {
                    content_type: content_type.clone(),
                });
            }
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_bytes {
                return Err(ImageError::TooLarge {
                    size: length as usize,
                    limit: self.max_bytes,
                });
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.max_bytes {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let mut icon = Icon::new(url, self.shape_for(circle_mask), bytes.to_vec());
        icon.content_type = content_type;
        Ok(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(max_bytes: usize) -> HttpImageLoader {
        HttpImageLoader::new(&ImageConfig {
            request_timeout_seconds: 5,
            max_bytes,
            crop_square: true,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_image_with_circle_mask() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/avatar.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0x89, b'P', b'N', b'G'])
            .create_async()
            .await;

        let url = format!("{}/avatar.png", server.url());
        let icon = loader(1024).fetch(&url, true).await.unwrap();

        mock.assert_async().await;
        assert_eq!(icon.shape, IconShape::Circle);
        assert!(icon.is_circular());
        assert_eq!(icon.byte_len, 4);
        assert_eq!(icon.content_type.as_deref(), Some("image/png"));
        assert_eq!(icon.source_url, url);
    }

    #[tokio::test]
    async fn test_fetch_image_square_without_mask() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/project.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body("jpeg")
            .create_async()
            .await;

        let url = format!("{}/project.jpg", server.url());
        let icon = loader(1024).fetch(&url, false).await.unwrap();

        assert_eq!(icon.shape, IconShape::Square);
    }

    #[tokio::test]
    async fn test_fetch_image_bad_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.png")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing.png", server.url());
        let result = loader(1024).fetch(&url, false).await;

        assert!(matches!(result, Err(ImageError::BadStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_image_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let url = format!("{}/page", server.url());
        let result = loader(1024).fetch(&url, false).await;

        assert!(matches!(result, Err(ImageError::NotAnImage { .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_image() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/big.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0u8; 64])
            .create_async()
            .await;

        let url = format!("{}/big.png", server.url());
        let result = loader(16).fetch(&url, false).await;

        assert!(matches!(result, Err(ImageError::TooLarge { limit: 16, .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let result = loader(1024).fetch("ftp://example.com/a.png", false).await;
        assert!(matches!(result, Err(ImageError::InvalidUrl { .. })));
    }
}
