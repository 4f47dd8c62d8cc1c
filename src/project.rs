//! JSON project files.
//!
//! A project is a JSON array of scene objects in paint order. Image entries
//! embed both bitmaps as PNG data URLs (`imgSrc` for the filtered pixels,
//! `originalImgSrc` for the source) so a file is self-contained.
//!
//! Loading is all-or-nothing: every entry is parsed and every embedded image
//! decoded before anything touches the [`ImageStore`], so a bad file leaves
//! the editor exactly as it was.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::{self, AssetError, ImageStore};
use crate::scene::{Font, ObjectId, ObjectKind, Scene, SceneObject};

/// Variant payload as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProjectKind {
    Image {
        #[serde(rename = "imgSrc")]
        img_src: String,
        #[serde(rename = "originalImgSrc")]
        original_img_src: String,
    },
    Text {
        content: String,
        font: Font,
    },
    Rectangle,
}

/// One entry of a project file.
pub type ProjectObject = SceneObject<ProjectKind>;

/// Largest object id a project may carry: ids stay exact as JS numbers and
/// the counter restored from them cannot overflow.
pub const MAX_OBJECT_ID: ObjectId = (1 << 53) - 1;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("malformed project json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("object {id}: {source}")]
    Image {
        id: ObjectId,
        #[source]
        source: AssetError,
    },
    #[error("object {id} has non-positive size {width}x{height}")]
    InvalidSize { id: ObjectId, width: f64, height: f64 },
    #[error("duplicate object id {0}")]
    DuplicateId(ObjectId),
    #[error("object id {0} is out of range")]
    IdOutOfRange(ObjectId),
}

/// Serialize every object in `scene`, embedding image pixels from `images`.
///
/// # Errors
///
/// Returns [`ProjectError::Image`] if a referenced bitmap is missing or
/// fails to encode.
pub fn save(scene: &Scene, images: &ImageStore) -> Result<String, ProjectError> {
    let entries = scene.objects().iter().map(|obj| to_project(obj, images)).collect::<Result<Vec<_>, _>>()?;
    let json = serde_json::to_string_pretty(&entries)?;
    log::info!("project: saved {} objects ({} bytes)", entries.len(), json.len());
    Ok(json)
}

fn to_project(obj: &SceneObject, images: &ImageStore) -> Result<ProjectObject, ProjectError> {
    let image_err = |source| ProjectError::Image { id: obj.id, source };
    let kind = match &obj.kind {
        ObjectKind::Image { current, original } => ProjectKind::Image {
            img_src: images.require(*current).and_then(assets::to_png_data_url).map_err(image_err)?,
            original_img_src: images.require(*original).and_then(assets::to_png_data_url).map_err(image_err)?,
        },
        ObjectKind::Text { content, font } => ProjectKind::Text { content: content.clone(), font: font.clone() },
        ObjectKind::Rectangle => ProjectKind::Rectangle,
    };
    Ok(obj.with_kind(kind))
}

/// Decoded pixels for one entry, held until the whole file has validated.
enum Decoded {
    Plain(ObjectKind),
    Image { current: RgbaImage, original: Option<RgbaImage> },
}

/// Parse a project and rehydrate its images into `images`.
///
/// On success returns the objects in paint order; the caller replaces the
/// scene with them and recomputes the id counter.
///
/// # Errors
///
/// Returns [`ProjectError`] for malformed JSON, invalid sizes, duplicate or
/// out-of-range ids, or any embedded image that fails to decode. `images` is untouched
/// in that case.
pub fn load(json: &str, images: &mut ImageStore) -> Result<Vec<SceneObject>, ProjectError> {
    let entries: Vec<ProjectObject> = serde_json::from_str(json)?;

    let mut seen = std::collections::HashSet::with_capacity(entries.len());
    let mut decoded = Vec::with_capacity(entries.len());
    for entry in &entries {
        if !(entry.width > 0.0 && entry.height > 0.0) {
            return Err(ProjectError::InvalidSize { id: entry.id, width: entry.width, height: entry.height });
        }
        if entry.id > MAX_OBJECT_ID {
            return Err(ProjectError::IdOutOfRange(entry.id));
        }
        if !seen.insert(entry.id) {
            return Err(ProjectError::DuplicateId(entry.id));
        }
        decoded.push(decode_entry(entry)?);
    }

    let objects: Vec<SceneObject> = entries
        .iter()
        .zip(decoded)
        .map(|(entry, decoded)| {
            let kind = match decoded {
                Decoded::Plain(kind) => kind,
                Decoded::Image { current, original } => {
                    let current = images.insert(current);
                    let original = original.map_or(current, |img| images.insert(img));
                    ObjectKind::Image { current, original }
                }
            };
            entry.with_kind(kind)
        })
        .collect();
    log::info!("project: loaded {} objects", objects.len());
    Ok(objects)
}

fn decode_entry(entry: &ProjectObject) -> Result<Decoded, ProjectError> {
    let image_err = |source| ProjectError::Image { id: entry.id, source };
    Ok(match &entry.kind {
        ProjectKind::Image { img_src, original_img_src } => {
            let current = assets::from_data_url(img_src).map_err(image_err)?;
            // Unfiltered images embed the same pixels twice; share one key.
            let original = if original_img_src == img_src {
                None
            } else {
                Some(assets::from_data_url(original_img_src).map_err(image_err)?)
            };
            Decoded::Image { current, original }
        }
        ProjectKind::Text { content, font } => {
            Decoded::Plain(ObjectKind::Text { content: content.clone(), font: font.clone() })
        }
        ProjectKind::Rectangle => Decoded::Plain(ObjectKind::Rectangle),
    })
}
