//! User-facing console lines.
//! Prefixes are colored only when the target stream is a TTY, so piped output
//! stays plain and scriptable.

use owo_colors::OwoColorize;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// "key: value" with an aligned, dimmed key on a TTY.
pub fn print_field(key: &str, value: &str) {
    if stdout_tty() {
        println!("{:>12} {}", format!("{key}:").dimmed(), value);
    } else {
        println!("{key}: {value}");
    }
}

/// Plain line with no prefix. Primary results (resolved paths) go here so
/// scripts can read them.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
