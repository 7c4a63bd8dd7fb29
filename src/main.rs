// SPDX-License-Identifier: MIT
//
// huesmith: derive brand color palettes from the command line.
//
// This binary is a thin shell over the two library crates:
//
//   hs-color   → parsing, hex/RGB/HSL conversion, adjustments
//   hs-palette → classification, candidates, light/dark roles, contrast
//
// Each subcommand builds a `Context` from its flags, calls one engine entry
// point, and prints the result as JSON (default) or as terminal swatches:
//
//   argv → clap → Command → engine call → Report → json | table → stdout
//
// Diagnostics go through `tracing` to stderr, so stdout stays parseable.

mod swatch;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hs_color::parse_color;
use hs_palette::{
    Assessment, Context, ContrastCheck, DarkRoles, HueBand, LightRoles, ParseRoleError,
    ResolvedRole, RoleName, RoleSource, Theme, Vibe, assess_contrast, contrast_checks,
    correct_accent_for_primary, dark_contrast_checks, derive_dark_mode_variants,
    derive_light_roles, labeled_ramp, regenerate_palette, resolve_roles,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "huesmith", version, about = "Deterministic brand palettes from one color")]
struct Cli {
    /// Log engine decisions (candidate scores, contrast shortfalls) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

/// Qualitative inputs shared by the derivation commands.
#[derive(Args, Debug, Default)]
struct ContextArgs {
    /// Tone tag (repeatable, or comma-separated)
    #[arg(short = 't', long = "tag", value_delimiter = ',')]
    tags: Vec<String>,
    /// Industry label, matched by substring
    #[arg(short, long, default_value = "")]
    industry: String,
    /// Diversity seed
    #[arg(long, default_value_t = 0)]
    variant: u32,
}

impl ContextArgs {
    fn context(&self) -> Context {
        Context::new(&self.tags, self.industry.as_str(), self.variant)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Full light and dark palette with classification and contrast checks
    Derive {
        primary: String,
        /// Page background (defaults to white)
        #[arg(short, long)]
        background: Option<String>,
        #[command(flatten)]
        ctx: ContextArgs,
    },
    /// Dark-mode roles only
    Dark {
        primary: String,
        /// Light-mode background the dark palette pairs with
        #[arg(short, long)]
        background: Option<String>,
        #[command(flatten)]
        ctx: ContextArgs,
    },
    /// A fresh light palette for the same primary, seeded by --variant
    Regenerate {
        primary: String,
        #[command(flatten)]
        ctx: ContextArgs,
    },
    /// WCAG contrast between two colors
    Contrast { foreground: String, background: String },
    /// Repair a proposed accent so it suits the primary
    Correct {
        primary: String,
        accent: String,
        /// Tone tag (repeatable, or comma-separated)
        #[arg(short = 't', long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Tints and shades of one color
    Ramp {
        color: String,
        /// Number of steps, at most 5
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
    /// Resolve named roles, honoring caller-supplied values
    Roles {
        primary: String,
        #[arg(short, long)]
        background: Option<String>,
        /// Roles to resolve (comma-separated); defaults to primary,background,text,link
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
        /// Supplied value, as role=color (repeatable)
        #[arg(long = "set")]
        set: Vec<String>,
        #[command(flatten)]
        ctx: ContextArgs,
    },
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum CliError {
    #[error("{what} `{value}` is not a color (expected #rgb, #rrggbb or rgb(r, g, b))")]
    InvalidColor { what: &'static str, value: String },
    #[error(transparent)]
    UnknownRole(#[from] ParseRoleError),
    #[error("`{0}` is not a role=color assignment")]
    BadAssignment(String),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Canonical hex for a color argument, or an error naming the argument.
fn color_arg(what: &'static str, value: &str) -> Result<String, CliError> {
    parse_color(value)
        .map(|c| c.to_hex())
        .ok_or_else(|| CliError::InvalidColor { what, value: value.to_owned() })
}

fn optional_color_arg(what: &'static str, value: Option<&str>) -> Result<Option<String>, CliError> {
    value.map(|v| color_arg(what, v)).transpose()
}

/// Parse repeated `role=color` flags. Role names must be known; colors must
/// parse.
fn assignments(set: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    let mut out = BTreeMap::new();
    for item in set {
        let (role, color) = item
            .split_once('=')
            .ok_or_else(|| CliError::BadAssignment(item.clone()))?;
        let role: RoleName = role.trim().parse()?;
        out.insert(role.name().to_owned(), color_arg("value", color.trim())?);
    }
    Ok(out)
}

// ─── Reports ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    vibe: Vibe,
    theme: Theme,
    hue_band: Option<HueBand>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeriveReport {
    classification: Classification,
    light: LightRoles,
    dark: DarkRoles,
    checks: Vec<ContrastCheck>,
    dark_checks: Vec<ContrastCheck>,
}

#[derive(Serialize)]
struct ContrastReport {
    foreground: String,
    background: String,
    #[serde(flatten)]
    assessment: Assessment,
}

#[derive(Serialize)]
struct CorrectReport {
    primary: String,
    proposed: String,
    accent: String,
}

#[derive(Serialize)]
struct RampStep {
    label: &'static str,
    hex: String,
}

/// Everything a subcommand can print.
enum Report {
    Derive(Box<DeriveReport>),
    Dark(DarkRoles),
    Light(LightRoles),
    Contrast(ContrastReport),
    Correct(CorrectReport),
    Ramp(Vec<RampStep>),
    Roles(Vec<ResolvedRole>),
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn execute(command: &Command) -> Result<Report, CliError> {
    let report = match command {
        Command::Derive { primary, background, ctx } => {
            let primary = color_arg("primary", primary)?;
            let background = optional_color_arg("background", background.as_deref())?;
            let ctx = ctx.context();
            let light = derive_light_roles(&primary, background.as_deref(), &ctx);
            let dark = derive_dark_mode_variants(&primary, Some(&light.background), &ctx);
            Report::Derive(Box::new(DeriveReport {
                classification: Classification {
                    vibe: ctx.vibe(),
                    theme: ctx.theme(),
                    hue_band: HueBand::of_color(&primary),
                },
                checks: contrast_checks(&light),
                dark_checks: dark_contrast_checks(&dark, &light.primary),
                light,
                dark,
            }))
        }
        Command::Dark { primary, background, ctx } => {
            let primary = color_arg("primary", primary)?;
            let background = optional_color_arg("background", background.as_deref())?;
            Report::Dark(derive_dark_mode_variants(&primary, background.as_deref(), &ctx.context()))
        }
        Command::Regenerate { primary, ctx } => {
            let primary = color_arg("primary", primary)?;
            Report::Light(regenerate_palette(&primary, &ctx.context()))
        }
        Command::Contrast { foreground, background } => {
            let foreground = color_arg("foreground", foreground)?;
            let background = color_arg("background", background)?;
            let assessment = assess_contrast(&foreground, &background);
            Report::Contrast(ContrastReport { foreground, background, assessment })
        }
        Command::Correct { primary, accent, tags } => {
            let primary = color_arg("primary", primary)?;
            let proposed = color_arg("accent", accent)?;
            let accent = correct_accent_for_primary(&primary, &proposed, tags);
            Report::Correct(CorrectReport { primary, proposed, accent })
        }
        Command::Ramp { color, steps } => {
            let color = color_arg("color", color)?;
            let steps = labeled_ramp(&color, *steps)
                .into_iter()
                .map(|(label, hex)| RampStep { label, hex })
                .collect();
            Report::Ramp(steps)
        }
        Command::Roles { primary, background, roles, set, ctx } => {
            let primary = color_arg("primary", primary)?;
            let background = optional_color_arg("background", background.as_deref())?;
            let supplied = assignments(set)?;
            debug!(requested = roles.len(), supplied = supplied.len(), "resolving roles");
            Report::Roles(resolve_roles(
                roles,
                &supplied,
                &primary,
                background.as_deref(),
                &ctx.context(),
            ))
        }
    };
    Ok(report)
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn write_json(out: &mut impl Write, report: &Report) -> Result<(), CliError> {
    match report {
        Report::Derive(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Dark(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Light(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Contrast(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Correct(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Ramp(r) => serde_json::to_writer_pretty(&mut *out, r)?,
        Report::Roles(r) => serde_json::to_writer_pretty(&mut *out, r)?,
    }
    writeln!(out)?;
    Ok(())
}

fn light_rows(out: &mut impl Write, roles: &LightRoles) -> io::Result<()> {
    for role in RoleName::all() {
        if let Some(hex) = role.in_light(roles) {
            swatch::row(out, role.name(), hex)?;
        }
    }
    Ok(())
}

fn dark_rows(out: &mut impl Write, roles: &DarkRoles) -> io::Result<()> {
    for role in RoleName::all() {
        if let Some(hex) = role.in_dark(roles) {
            swatch::row(out, role.name(), hex)?;
        }
    }
    Ok(())
}

fn write_table(out: &mut impl Write, report: &Report) -> io::Result<()> {
    match report {
        Report::Derive(r) => {
            let c = &r.classification;
            let band = c.hue_band.map_or("-", HueBand::name);
            writeln!(out, "vibe {}  theme {}  hue band {band}", c.vibe, c.theme)?;
            swatch::heading(out, "light")?;
            light_rows(out, &r.light)?;
            swatch::heading(out, "dark")?;
            dark_rows(out, &r.dark)?;
            swatch::heading(out, "contrast")?;
            for check in r.checks.iter().chain(&r.dark_checks) {
                swatch::check_row(out, check)?;
            }
        }
        Report::Dark(r) => dark_rows(out, r)?,
        Report::Light(r) => light_rows(out, r)?,
        Report::Contrast(r) => {
            swatch::row(out, "foreground", &r.foreground)?;
            swatch::row(out, "background", &r.background)?;
            writeln!(out, "  {}", swatch::verdict(&r.assessment))?;
        }
        Report::Correct(r) => {
            swatch::row(out, "primary", &r.primary)?;
            swatch::row(out, "proposed", &r.proposed)?;
            swatch::row(out, "accent", &r.accent)?;
        }
        Report::Ramp(steps) => {
            for step in steps {
                swatch::row(out, step.label, &step.hex)?;
            }
        }
        Report::Roles(roles) => {
            for r in roles {
                let source = match r.source {
                    RoleSource::Supplied => "supplied",
                    RoleSource::Derived => "derived",
                    RoleSource::Fallback => "fallback",
                };
                swatch::row(out, &format!("{} ({source})", r.role), &r.hex)?;
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let report = execute(&cli.command)?;
    match cli.format {
        Format::Json => write_json(out, &report)?,
        Format::Table => write_table(out, &report)?,
    }
    out.flush()?;
    Ok(())
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// `HUESMITH_LOG` wins, then `RUST_LOG`, then `warn` (`debug` with
/// `--verbose`). Fails if a global subscriber is already installed.
fn init_tracing(verbose: bool) -> Result<(), TryInitError> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HUESMITH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish()
        .try_init()
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("huesmith: logging disabled: {e}");
    }

    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("huesmith: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hs_palette::RAMP_LABELS;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("huesmith").chain(args.iter().copied())).unwrap()
    }

    fn output(args: &[&str]) -> Result<String, CliError> {
        let mut buf = Vec::new();
        run(&cli(args), &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn json(args: &[&str]) -> Value {
        serde_json::from_str(&output(args).unwrap()).unwrap()
    }

    // ── Argument parsing ──────────────────────────────────────────────────

    #[test]
    fn tags_accept_commas_and_repeats() {
        let parsed = cli(&["derive", "#1d4ed8", "-t", "bold,playful", "--tag", "tech"]);
        let Command::Derive { ctx, .. } = parsed.command else {
            panic!("expected derive");
        };
        assert_eq!(ctx.tags, ["bold", "playful", "tech"]);
        assert_eq!(ctx.variant, 0);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let parsed = cli(&["ramp", "#1d4ed8", "--format", "table", "-v"]);
        assert_eq!(parsed.format, Format::Table);
        assert!(parsed.verbose);
    }

    // ── Commands ──────────────────────────────────────────────────────────

    #[test]
    fn derive_reports_everything() {
        let v = json(&["derive", "#1D4ED8", "--variant", "2"]);
        assert_eq!(v["light"]["primary"], "#1d4ed8");
        assert_eq!(v["light"]["background"], "#ffffff");
        assert_eq!(v["classification"]["hueBand"], "blue");
        assert_eq!(v["classification"]["theme"], "muted");
        assert_eq!(v["checks"].as_array().map(Vec::len), Some(5));
        assert_eq!(v["darkChecks"].as_array().map(Vec::len), Some(4));
        assert!(v["dark"]["backgroundDark"].is_string());
    }

    #[test]
    fn contrast_flattens_assessment() {
        let v = json(&["contrast", "#000", "#fff"]);
        assert_eq!(v["foreground"], "#000000");
        assert_eq!(v["AA"], true);
        assert_eq!(v["AAALarge"], true);
        let ratio = v["ratio"].as_f64().unwrap();
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn correct_reports_both_colors() {
        let v = json(&["correct", "#22c55e", "#a855f7"]);
        assert_eq!(v["proposed"], "#a855f7");
        assert_ne!(v["accent"], "#a855f7");
    }

    #[test]
    fn ramp_is_labeled() {
        let v = json(&["ramp", "#1d4ed8", "--steps", "3"]);
        let labels: Vec<_> = v.as_array().unwrap().iter().map(|s| s["label"].clone()).collect();
        assert_eq!(labels, ["50", "300", "500"]);
        assert_eq!(RAMP_LABELS.len(), 5);
    }

    #[test]
    fn roles_honor_supplied_values() {
        let v = json(&["roles", "#1d4ed8", "--roles", "accent,sparkle", "--set", "accent=#ABC"]);
        assert_eq!(v[0]["hex"], "#aabbcc");
        assert_eq!(v[0]["source"], "supplied");
        assert_eq!(v[1]["hex"], "#1d4ed8");
        assert_eq!(v[1]["source"], "fallback");
    }

    #[test]
    fn regenerate_and_dark_print_roles() {
        let v = json(&["regenerate", "#b91c1c", "--variant", "1", "-t", "earthy"]);
        assert_eq!(v["primary"], "#b91c1c");
        let v = json(&["dark", "#b91c1c"]);
        assert_eq!(v["textDark"], "#ffffff");
    }

    #[test]
    fn table_format_paints_swatches() {
        let out = output(&["derive", "#1d4ed8", "--format", "table"]).unwrap();
        assert!(out.contains("\x1b[48;2;29;78;216m"));
        assert!(out.contains("neutralDarkDark"));
        assert!(out.contains("primary on neutralLight"));
    }

    // ── Logging ───────────────────────────────────────────────────────────

    #[test]
    fn second_subscriber_is_refused() {
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }

    // ── Errors ────────────────────────────────────────────────────────────

    #[test]
    fn bad_primary_is_an_error() {
        let err = output(&["derive", "blurple"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "primary `blurple` is not a color (expected #rgb, #rrggbb or rgb(r, g, b))"
        );
    }

    #[test]
    fn bad_assignments_are_errors() {
        let err = output(&["roles", "#1d4ed8", "--set", "accent"]).unwrap_err();
        assert!(matches!(err, CliError::BadAssignment(_)));
        let err = output(&["roles", "#1d4ed8", "--set", "glow=#fff"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown role `glow`");
        let err = output(&["roles", "#1d4ed8", "--set", "accent=nope"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidColor { what: "value", .. }));
    }
}
