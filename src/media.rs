// src/media.rs
use crate::error::{AppError, AppResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use qrcode::{render::svg, QrCode};
use std::path::{Path, PathBuf};

/// Writes student photos and QR codes under a root directory.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

/// Paths written for one student, stored on the student row as-is.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudentMedia {
    pub photo: Option<String>,
    pub qr_code: Option<String>,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dirs(&self) -> AppResult<()> {
        for dir in [self.root.join("photos"), self.root.join("qr_codes")] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AppError::Media(format!("creating {}: {}", dir.display(), e)))?;
        }
        Ok(())
    }

    /// Writes the photo (if any) and the QR code for `student_id`.
    /// On failure, whatever was already written is removed.
    pub async fn save_student_media(
        &self,
        student_id: &str,
        photo: Option<&[u8]>,
    ) -> AppResult<StudentMedia> {
        self.ensure_dirs().await?;
        let mut written = StudentMedia::default();

        if let Some(bytes) = photo {
            let path = self.root.join("photos").join(format!("{}_photo.png", student_id));
            if let Err(e) = tokio::fs::write(&path, bytes).await {
                return Err(AppError::Media(format!("writing {}: {}", path.display(), e)));
            }
            written.photo = Some(path_string(&path));
        }

        let qr_result = async {
            let svg = render_qr_svg(student_id)?;
            let path = self.root.join("qr_codes").join(format!("{}_qr.svg", student_id));
            tokio::fs::write(&path, svg)
                .await
                .map_err(|e| AppError::Media(format!("writing {}: {}", path.display(), e)))?;
            Ok::<_, AppError>(path_string(&path))
        }
        .await;

        match qr_result {
            Ok(qr_path) => {
                written.qr_code = Some(qr_path);
                Ok(written)
            }
            Err(e) => {
                self.remove(&written).await;
                Err(e)
            }
        }
    }

    /// Best-effort cleanup; failures are only logged.
    pub async fn remove(&self, media: &StudentMedia) {
        for path in [&media.photo, &media.qr_code].into_iter().flatten() {
            if let Err(e) = tokio::fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove media file {}: {}", path, e);
                }
            }
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Decodes a photo payload, dropping a `data:<mime>;base64,` header if present.
pub fn decode_photo(payload: &str) -> AppResult<Vec<u8>> {
    let data = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };
    STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::Validation(format!("Error saving photo: {}", e)))
}

pub fn render_qr_svg(content: &str) -> AppResult<String> {
    let code = QrCode::new(content.as_bytes())
        .map_err(|e| AppError::Media(format!("QR encoding failed: {}", e)))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_uri_header() {
        let raw = decode_photo("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(raw, b"hello");
        assert_eq!(decode_photo("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn bad_base64_is_a_validation_error() {
        assert!(matches!(decode_photo("not base64!!"), Err(AppError::Validation(_))));
    }

    #[test]
    fn qr_svg_is_rendered() {
        let svg = render_qr_svg("0001").unwrap();
        assert!(svg.contains("<svg"));
    }

    #[tokio::test]
    async fn writes_photo_and_qr_under_root() {
        let root = std::env::temp_dir().join(format!("campus-media-{}", std::process::id()));
        let store = MediaStore::new(&root);

        let media = store.save_student_media("0042", Some(&b"png-bytes"[..])).await.unwrap();
        let photo = media.photo.clone().unwrap();
        let qr = media.qr_code.clone().unwrap();
        assert!(photo.ends_with("photos/0042_photo.png"));
        assert!(qr.ends_with("qr_codes/0042_qr.svg"));
        assert_eq!(tokio::fs::read(&photo).await.unwrap(), b"png-bytes");

        store.remove(&media).await;
        assert!(tokio::fs::metadata(&photo).await.is_err());
        assert!(tokio::fs::metadata(&qr).await.is_err());
        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
