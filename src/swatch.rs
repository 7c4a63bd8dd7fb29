// SPDX-License-Identifier: MIT
//
// Terminal swatches for `--format table`.
//
// Every row paints a block in the color itself using 24-bit SGR sequences,
// with the label drawn in whichever of black or white reads best on it.
// Output goes to any `impl Write`, so tests can capture it in a Vec.

use std::io::{self, Write};

use hs_color::{Rgb, parse_color};
use hs_palette::{Assessment, ContrastCheck, best_text_on};

/// Width of the painted block, in cells.
const BLOCK_WIDTH: usize = 10;

// ─── SGR ─────────────────────────────────────────────────────────────────────

fn fg(w: &mut impl Write, c: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

fn bg(w: &mut impl Write, c: Rgb) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b)
}

fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Section header.
pub fn heading(w: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(w, "\x1b[1m{title}\x1b[0m")
}

/// `<block> label  #rrggbb`. Unparsable colors get a plain row.
pub fn row(w: &mut impl Write, label: &str, hex: &str) -> io::Result<()> {
    let Some(color) = parse_color(hex) else {
        return writeln!(w, "  {:BLOCK_WIDTH$}  {label:<18} {hex}", "?");
    };
    let ink = parse_color(best_text_on(hex)).unwrap_or(Rgb::BLACK);

    write!(w, "  ")?;
    bg(w, color)?;
    fg(w, ink)?;
    write!(w, "{:^BLOCK_WIDTH$}", "Aa")?;
    reset(w)?;
    writeln!(w, "  {label:<18} {}", color.to_hex())
}

/// Ratio plus the four WCAG levels, e.g. `7.02:1  AA AAA AA-large AAA-large`.
pub fn verdict(a: &Assessment) -> String {
    let Some(ratio) = a.ratio else {
        return "n/a".to_owned();
    };
    let mut out = format!("{ratio:>5.2}:1 ");
    for (pass, name) in [
        (a.aa(), "AA"),
        (a.aaa(), "AAA"),
        (a.aa_large(), "AA-large"),
        (a.aaa_large(), "AAA-large"),
    ] {
        out.push(' ');
        if pass {
            out.push_str(name);
        } else {
            out.push_str(&"-".repeat(name.len()));
        }
    }
    out
}

/// One contrast check: the foreground painted on its background, then the
/// verdict.
pub fn check_row(w: &mut impl Write, check: &ContrastCheck) -> io::Result<()> {
    match (parse_color(&check.foreground), parse_color(&check.background)) {
        (Some(f), Some(b)) => {
            write!(w, "  ")?;
            bg(w, b)?;
            fg(w, f)?;
            write!(w, "{:^BLOCK_WIDTH$}", "Aa")?;
            reset(w)?;
        }
        _ => write!(w, "  {:BLOCK_WIDTH$}", "?")?,
    }
    writeln!(w, "  {:<36} {}", check.label, verdict(&check.assessment))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
