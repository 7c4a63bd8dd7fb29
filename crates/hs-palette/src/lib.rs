//! # hs-palette: deterministic brand palette engine
//!
//! Derives a complete, contrast-checked set of UI color roles from one
//! brand color. The same `(primary, background, tags, industry, variant)`
//! always produces the same palette; `variant` is the only knob for
//! diversity.
//!
//! # Architecture
//!
//! ```text
//! primary + background + Context { tags, industry, variant }
//!     │
//!     ▼
//! classify.rs:  HueBand, Vibe, Theme (ordered keyword rules)
//!     │
//!     ▼
//! pattern.rs:   theme menus + generic harmonies (hue offsets)
//!     │
//!     ▼
//! candidate.rs: generate, separate (≥ 40°), score, pick best
//!     │
//!     ▼
//! contrast.rs:  WCAG luminance, bounded lightness correction
//!     │
//!     ├──► palette.rs:    light roles (accent, secondary, neutrals, link, text)
//!     ├──► dark.rs:       dark-mode counterparts
//!     ├──► regenerate.rs: fresh light palette for a new variant
//!     └──► roles.rs:      role names, resolution, suggestion intake, checks
//! ```
//!
//! `correct.rs` repairs accents proposed by an outside service and
//! `ramp.rs` builds tonal ramps; both sit beside the main pipeline.
//!
//! # Failure model
//!
//! Nothing in this crate panics or returns `Err` on bad color input.
//! Unparsable primaries fall back to [`palette::DEFAULT_PRIMARY`],
//! unparsable backgrounds to white, and contrast loops that run out of
//! steps hand back the closest color they reached (see
//! [`contrast::enforce_contrast`] to observe the shortfall).

// Variant seeds and loop counters feed float math.
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness names for accent vs secondary are inherently similar.
#![allow(clippy::similar_names)]

pub mod candidate;
pub mod classify;
pub mod contrast;
pub mod correct;
pub mod dark;
pub mod palette;
pub mod pattern;
pub mod ramp;
pub mod regenerate;
pub mod roles;

pub use classify::{Context, HueBand, ParseKindError, Theme, Vibe};
pub use contrast::{
    Assessment, Enforced, WcagPass, assess_contrast, best_text_on, contrast_ratio,
    enforce_contrast, ensure_contrast,
};
pub use correct::correct_accent_for_primary;
pub use dark::{DarkRoles, derive_dark_mode_variants};
pub use palette::{ExtendedRoles, LightRoles, derive_extended_roles_aesthetic, derive_light_roles};
pub use ramp::{RAMP_LABELS, build_ramp, labeled_ramp};
pub use regenerate::regenerate_palette;
pub use roles::{
    ContrastCheck, ParseRoleError, ResolvedRole, RoleName, RoleSource, apply_suggestions,
    contrast_checks, dark_contrast_checks, resolve_roles,
};
