//! Utilities for printing and everything related to "UI".

use term_painter::{Color, Style, ToStyle};


macro_rules! print_msg {
    ($kind:ident: $icon:literal => $($args:tt)*) => {{
        let body = format!($($args)*);
        crate::ui::print_wrapped(crate::ui::MsgKind::$kind, $icon, &body);
    }};
}

/// Prints the message, evaluates `$body` and then marks the message as done
/// together with the time it took.
macro_rules! progress {
    ([$($args:tt)*] => $body:tt) => {{
        use std::{
            io::{stdout, Write},
            time::Instant,
        };
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let msg = format!($($args)*);
        let body_style = MsgKind::Progress.body_style();
        let icon_style = MsgKind::Progress.icon_style();

        print!("{} {} ... ", icon_style.paint("[…]"), body_style.paint(&msg));
        let _ = stdout().flush();

        let before = Instant::now();
        let out = $body;
        let time = before.elapsed();

        println!(
            "\r{} {} ... {} (in {:.2?})",
            icon_style.paint("[✓]"),
            body_style.paint(&msg),
            icon_style.paint("done"),
            time,
        );

        out
    }};
}

macro_rules! info {
    () => { info!("") };
    ($($t:tt)*) => {
        print_msg!(Info: 'i' => $($t)*);
    };
}

macro_rules! warn {
    () => { warn!("") };
    ($($t:tt)*) => {
        print_msg!(Warning: 'w' => $($t)*);
    };
}

macro_rules! error {
    () => { error!("") };
    ($($t:tt)*) => {
        print_msg!(Error: '!' => $($t)*);
    };
}

#[derive(Debug, Clone, Copy)]
pub enum MsgKind {
    Error,
    Warning,
    Info,
    Progress,
}

impl MsgKind {
    pub fn icon_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::Red.bold(),
            MsgKind::Warning => Color::Yellow.bold(),
            MsgKind::Info => Color::Blue.bold(),
            MsgKind::Progress => Color::Green.bold(),
        }
    }

    pub fn body_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::BrightRed.to_style(),
            MsgKind::Warning => Color::BrightYellow.to_style(),
            MsgKind::Info => Color::NotSet.to_style(),
            MsgKind::Progress => Color::NotSet.to_style(),
        }
    }
}

/// Prints `[icon] body`, rewrapping the body for the terminal width.
/// Continuation lines are indented and connected with box drawing chars.
pub fn print_wrapped(kind: MsgKind, icon: char, body: &str) {
    let width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80).min(100);
    let lines = wrap(body, width.saturating_sub(7).max(20));

    for (i, line) in lines.iter().enumerate() {
        let prefix = match i {
            0 => format!("[{}] ", icon),
            _ if i == lines.len() - 1 => "    └ ".to_string(),
            _ => "    │ ".to_string(),
        };

        println!("{}{}", kind.icon_style().paint(prefix), kind.body_style().paint(line));
    }
}

/// Splits `body` into lines of at most `width` chars (unless a single word
/// is longer). Always returns at least one line.
pub fn wrap(body: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in body.split_whitespace() {
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > width {
            lines.push(std::mem::replace(&mut current, String::new()));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);

    lines
}

/// Formats the given integer with `,` as thousand separator.
pub fn fmt_with_thousand_sep(mut v: u64) -> String {
    let mut groups = Vec::new();
    while v >= 1000 {
        groups.push(v % 1000);
        v /= 1000;
    }

    let mut out = v.to_string();
    for group in groups.iter().rev() {
        out.push_str(&format!(",{:03}", group));
    }

    out
}

/// Formats three coordinates like `(1.5, 0, -2)`.
pub fn fmt_triple(x: f64, y: f64, z: f64) -> String {
    format!("({}, {}, {})", x, y, z)
}
