//! Changeset-effect verification.
//!
//! An agent can claim success without making any real change, or make an
//! unrelated one; the editing backend can also silently drop an edit. This
//! module reconciles the *claimed* add/modify/delete intent against the
//! *observed* before/after shape state of the scoped slide, deterministically
//! and without re-deriving semantic equivalence.
//!
//! Problems accumulate as reasons rather than errors, so a single pass can
//! report several independent discrepancies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{
    Changeset, Document, PosPatch, Shape, ShapeId, ShapePatch, SizePatch, Slide, SlideId,
    VerificationOutcome,
};
use tracing::debug;

use crate::path;

/// Absolute tolerance for position/size checks, in slide units.
///
/// The editing backend converts between EMU and points when applying a
/// changeset, which introduces sub-unit rounding drift; exact equality would
/// reject honest edits.
pub const POSITION_TOLERANCE: f64 = 0.25;

/// Which slide of the before/after pair verification reconciles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerifyScope {
    /// The first slide of each document (the protocol's default target).
    #[default]
    FirstSlide,
    /// A specific slide, matched by id in both documents.
    Slide(SlideId),
}

/// Reconciles a changeset's intent against an observed document pair.
#[derive(Debug, Clone)]
pub struct ChangesetVerifier {
    scope: VerifyScope,
    tolerance: f64,
}

impl Default for ChangesetVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetVerifier {
    pub fn new() -> Self {
        Self {
            scope: VerifyScope::FirstSlide,
            tolerance: POSITION_TOLERANCE,
        }
    }

    pub fn with_scope(mut self, scope: VerifyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Determine whether the changeset's claimed intent is observable in the
    /// diff between `original` and `updated`.
    ///
    /// A no-op changeset requires no evidence and verifies trivially.
    pub fn verify(
        &self,
        original: &Document,
        updated: &Document,
        changeset: &Changeset,
    ) -> VerificationOutcome {
        if changeset.is_empty() {
            return VerificationOutcome::clean();
        }

        let original_shapes = self.scoped_shapes(original);
        let updated_shapes = self.scoped_shapes(updated);
        let mut reasons = Vec::new();

        for deleted in &changeset.deleted {
            if updated_shapes.contains_key(&deleted.id) {
                reasons.push(format!(
                    "shape {} was marked deleted but still exists in the updated document",
                    deleted.id
                ));
            }
        }

        let mut verified_modifications = 0usize;
        for patch in &changeset.modified {
            match (
                original_shapes.get(&patch.id),
                updated_shapes.get(&patch.id),
            ) {
                (Some(original_shape), Some(updated_shape)) => {
                    if self.patch_applied(patch, updated_shape) {
                        verified_modifications += 1;
                    } else if comparable_fields_unchanged(original_shape, updated_shape) {
                        reasons.push(format!(
                            "shape {} appears unchanged after injection",
                            patch.id
                        ));
                    } else {
                        debug!(
                            shape_id = patch.id,
                            "modified shape changed, but not to the requested values"
                        );
                    }
                }
                _ => {
                    reasons.push(format!(
                        "modified shape {} is missing from the original or updated slide",
                        patch.id
                    ));
                }
            }
        }

        let mut addition_verified = false;
        if !changeset.added.is_empty() {
            let new_ids: Vec<ShapeId> = updated_shapes
                .keys()
                .filter(|id| !original_shapes.contains_key(id))
                .copied()
                .collect();
            if new_ids.is_empty() {
                reasons.push(
                    "shapes were added but no new shape ids appeared in the updated document"
                        .to_string(),
                );
            } else {
                debug!(?new_ids, "addition intent confirmed");
                addition_verified = true;
            }
        }

        // Deletions self-certify once the deleted ids are confirmed absent,
        // but only when deletion is the sole intent.
        let deletions_only = !changeset.deleted.is_empty()
            && changeset.added.is_empty()
            && changeset.modified.is_empty();
        let applied = reasons.is_empty()
            && (verified_modifications > 0 || addition_verified || deletions_only);

        VerificationOutcome { applied, reasons }
    }

    fn scoped_slide<'a>(&self, doc: &'a Document) -> Option<&'a Slide> {
        match self.scope {
            VerifyScope::FirstSlide => doc.slides.first(),
            VerifyScope::Slide(id) => doc.slide(id),
        }
    }

    fn scoped_shapes<'a>(&self, doc: &'a Document) -> HashMap<ShapeId, &'a Shape> {
        self.scoped_slide(doc)
            .map(|slide| slide.shapes.iter().map(|s| (s.id, s)).collect())
            .unwrap_or_default()
    }

    /// A patch counts as applied when at least one of its requested field
    /// classes checks out against the updated shape.
    fn patch_applied(&self, patch: &ShapePatch, updated: &Shape) -> bool {
        let mut any = false;
        if let Some(pos) = &patch.pos {
            any |= self.pos_applied(pos, updated);
        }
        if let Some(size) = &patch.size {
            any |= self.size_applied(size, updated);
        }
        if let Some(z_index) = patch.z_index {
            any |= z_index_applied(z_index, updated);
        }
        any
    }

    fn pos_applied(&self, pos: &PosPatch, shape: &Shape) -> bool {
        let anchors = [
            ("pos.topLeft", pos.top_left),
            ("pos.bottomRight", pos.bottom_right),
            ("pos.center", pos.center),
        ];
        let mut any_requested = false;
        for (key, requested) in anchors {
            let Some(requested) = requested else { continue };
            any_requested = true;
            let Some(observed) = point2(shape, key) else {
                return false;
            };
            if !self.within(observed[0], requested[0]) || !self.within(observed[1], requested[1])
            {
                return false;
            }
        }
        any_requested
    }

    fn size_applied(&self, size: &SizePatch, shape: &Shape) -> bool {
        let dimensions = [("size.w", size.w), ("size.h", size.h)];
        let mut any_requested = false;
        for (key, requested) in dimensions {
            let Some(requested) = requested else { continue };
            any_requested = true;
            let Some(observed) = scalar(shape, key) else {
                return false;
            };
            if !self.within(observed, requested) {
                return false;
            }
        }
        any_requested
    }

    fn within(&self, observed: f64, requested: f64) -> bool {
        (observed - requested).abs() <= self.tolerance
    }
}

/// zIndex is discrete; the backend never drifts it, so equality is exact.
fn z_index_applied(requested: i64, shape: &Shape) -> bool {
    path::resolve(shape, "zIndex").and_then(|v| v.as_i64()) == Some(requested)
}

fn point2(shape: &Shape, key: &str) -> Option<[f64; 2]> {
    match path::resolve(shape, key)? {
        Value::Array(items) if items.len() == 2 => {
            Some([items[0].as_f64()?, items[1].as_f64()?])
        }
        _ => None,
    }
}

fn scalar(shape: &Shape, key: &str) -> Option<f64> {
    path::resolve(shape, key)?.as_f64()
}

/// Byte-identical comparison of the field classes the verifier knows about.
fn comparable_fields_unchanged(original: &Shape, updated: &Shape) -> bool {
    ["pos", "size", "zIndex"]
        .iter()
        .all(|key| path::resolve(original, key) == path::resolve(updated, key))
}
