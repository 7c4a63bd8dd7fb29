//! Named roles: lookup, resolution against caller-supplied values, and the
//! contrast report over a finished palette.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use hs_color::normalize_hex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::classify::Context;
use crate::contrast::{Assessment, assess_contrast};
use crate::correct::correct_accent_for_primary;
use crate::dark::{DarkRoles, derive_dark_mode_variants};
use crate::palette::{LightRoles, derive_light_roles};

// ---------------------------------------------------------------------------
// Role names
// ---------------------------------------------------------------------------

/// Every role slot of the brand color system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleName {
    Primary,
    Background,
    Text,
    Link,
    Accent,
    Secondary,
    NeutralLight,
    NeutralDark,
    OnPrimary,
    BackgroundDark,
    TextDark,
    LinkDark,
    NeutralLightDark,
    NeutralDarkDark,
}

/// Roles returned when a request names none.
pub const DEFAULT_REQUEST: [RoleName; 4] =
    [RoleName::Primary, RoleName::Background, RoleName::Text, RoleName::Link];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role `{0}`")]
pub struct ParseRoleError(pub String);

impl RoleName {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Background => "background",
            Self::Text => "text",
            Self::Link => "link",
            Self::Accent => "accent",
            Self::Secondary => "secondary",
            Self::NeutralLight => "neutralLight",
            Self::NeutralDark => "neutralDark",
            Self::OnPrimary => "onPrimary",
            Self::BackgroundDark => "backgroundDark",
            Self::TextDark => "textDark",
            Self::LinkDark => "linkDark",
            Self::NeutralLightDark => "neutralLightDark",
            Self::NeutralDarkDark => "neutralDarkDark",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Primary,
            Self::Background,
            Self::Text,
            Self::Link,
            Self::Accent,
            Self::Secondary,
            Self::NeutralLight,
            Self::NeutralDark,
            Self::OnPrimary,
            Self::BackgroundDark,
            Self::TextDark,
            Self::LinkDark,
            Self::NeutralLightDark,
            Self::NeutralDarkDark,
        ]
    }

    /// Dark-mode roles live in [`DarkRoles`]; the rest in [`LightRoles`].
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(
            self,
            Self::BackgroundDark
                | Self::TextDark
                | Self::LinkDark
                | Self::NeutralLightDark
                | Self::NeutralDarkDark
        )
    }

    /// This role's color in a light palette; `None` for dark roles.
    #[must_use]
    pub fn in_light(self, roles: &LightRoles) -> Option<&str> {
        let hex = match self {
            Self::Primary => &roles.primary,
            Self::Background => &roles.background,
            Self::Text => &roles.text,
            Self::Link => &roles.link,
            Self::Accent => &roles.accent,
            Self::Secondary => &roles.secondary,
            Self::NeutralLight => &roles.neutral_light,
            Self::NeutralDark => &roles.neutral_dark,
            Self::OnPrimary => &roles.on_primary,
            _ => return None,
        };
        Some(hex)
    }

    /// This role's color in a dark palette; `None` for light roles.
    #[must_use]
    pub fn in_dark(self, roles: &DarkRoles) -> Option<&str> {
        let hex = match self {
            Self::BackgroundDark => &roles.background_dark,
            Self::TextDark => &roles.text_dark,
            Self::LinkDark => &roles.link_dark,
            Self::NeutralLightDark => &roles.neutral_light_dark,
            Self::NeutralDarkDark => &roles.neutral_dark_dark,
            _ => return None,
        };
        Some(hex)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoleName {
    type Err = ParseRoleError;

    /// Case-insensitive: `neutralLight`, `NEUTRALLIGHT` and `neutrallight`
    /// all name the same role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|role| role.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseRoleError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Where a resolved color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSource {
    /// Caller-supplied and valid.
    Supplied,
    /// Computed by the engine.
    Derived,
    /// Unknown role name; the primary stands in.
    Fallback,
}

/// One requested role and its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRole {
    /// The role name as requested.
    pub role: String,
    pub hex: String,
    pub source: RoleSource,
}

/// Resolve each requested role, preserving request order.
///
/// A supplied value wins when it normalizes to a valid hex; otherwise the
/// engine's derivation is used. Unknown names resolve to the primary. An
/// empty request means [`DEFAULT_REQUEST`]. The dark palette is derived at
/// most once, and only when a dark role is requested.
#[must_use]
pub fn resolve_roles<S: AsRef<str>>(
    requested: &[S],
    supplied: &BTreeMap<String, String>,
    primary: &str,
    background: Option<&str>,
    ctx: &Context,
) -> Vec<ResolvedRole> {
    let requested: Vec<String> = if requested.is_empty() {
        DEFAULT_REQUEST.iter().map(|r| r.name().to_owned()).collect()
    } else {
        requested.iter().map(|r| r.as_ref().trim().to_owned()).collect()
    };

    let supplied: BTreeMap<RoleName, String> = supplied
        .iter()
        .filter_map(|(k, v)| Some((k.parse::<RoleName>().ok()?, normalize_hex(v)?)))
        .collect();

    let light = derive_light_roles(primary, background, ctx);
    let mut dark: Option<DarkRoles> = None;

    requested
        .into_iter()
        .map(|name| {
            let Ok(role) = name.parse::<RoleName>() else {
                debug!(role = %name, "unknown role, using primary");
                let hex = light.primary.clone();
                return ResolvedRole { role: name, hex, source: RoleSource::Fallback };
            };
            if let Some(hex) = supplied.get(&role) {
                return ResolvedRole { role: name, hex: hex.clone(), source: RoleSource::Supplied };
            }
            let hex = if role.is_dark() {
                let dark = dark.get_or_insert_with(|| {
                    derive_dark_mode_variants(&light.primary, Some(&light.background), ctx)
                });
                role.in_dark(dark)
            } else {
                role.in_light(&light)
            };
            let hex = hex.unwrap_or(&light.primary).to_owned();
            ResolvedRole { role: name, hex, source: RoleSource::Derived }
        })
        .collect()
}

/// Vet a palette proposed by an upstream service.
///
/// Entries with unknown role names or invalid colors are dropped, `primary`
/// is never overridden, and the accent is run through
/// [`correct_accent_for_primary`]. Surviving colors are normalized.
#[must_use]
pub fn apply_suggestions<S: AsRef<str>>(
    primary: &str,
    suggested: &BTreeMap<String, String>,
    tags: &[S],
) -> BTreeMap<RoleName, String> {
    let mut accepted = BTreeMap::new();
    for (key, value) in suggested {
        let (Ok(role), Some(hex)) = (key.parse::<RoleName>(), normalize_hex(value)) else {
            debug!(role = %key, value = %value, "suggestion dropped");
            continue;
        };
        match role {
            RoleName::Primary => {}
            RoleName::Accent => {
                accepted.insert(role, correct_accent_for_primary(primary, &hex, tags));
            }
            _ => {
                accepted.insert(role, hex);
            }
        }
    }
    accepted
}

// ---------------------------------------------------------------------------
// Contrast report
// ---------------------------------------------------------------------------

/// One foreground/background pair and how it fares against WCAG.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastCheck {
    pub label: &'static str,
    pub foreground: String,
    pub background: String,
    pub assessment: Assessment,
}

impl ContrastCheck {
    fn new(label: &'static str, foreground: &str, background: &str) -> Self {
        Self {
            label,
            foreground: foreground.to_owned(),
            background: background.to_owned(),
            assessment: assess_contrast(foreground, background),
        }
    }
}

/// The five essential light-mode pairs.
#[must_use]
pub fn contrast_checks(roles: &LightRoles) -> Vec<ContrastCheck> {
    vec![
        ContrastCheck::new("text on background", &roles.text, &roles.background),
        ContrastCheck::new("link on background", &roles.link, &roles.background),
        ContrastCheck::new("onPrimary on primary", &roles.on_primary, &roles.primary),
        ContrastCheck::new(
            "neutralDark on neutralLight",
            &roles.neutral_dark,
            &roles.neutral_light,
        ),
        ContrastCheck::new("primary on neutralLight", &roles.primary, &roles.neutral_light),
    ]
}

/// The four dark-mode pairs.
#[must_use]
pub fn dark_contrast_checks(roles: &DarkRoles, primary: &str) -> Vec<ContrastCheck> {
    vec![
        ContrastCheck::new("textDark on backgroundDark", &roles.text_dark, &roles.background_dark),
        ContrastCheck::new("linkDark on backgroundDark", &roles.link_dark, &roles.background_dark),
        ContrastCheck::new(
            "neutralDarkDark on neutralLightDark",
            &roles.neutral_dark_dark,
            &roles.neutral_light_dark,
        ),
        ContrastCheck::new("primary on neutralLightDark", primary, &roles.neutral_light_dark),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
