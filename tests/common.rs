#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn vt() -> Command {
    cargo_bin_cmd!("vtally")
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("vtally_{}_out.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// Write a session script into tempdir and return its path
pub fn write_script(name: &str, lines: &[&str]) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("vtally_{}.script", name));
    fs::write(&path, lines.join("\n")).expect("write script");
    path
}

/// Fixed wall clock instant for deterministic entries
pub fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 9, 1, h, m, s)
        .single()
        .expect("unambiguous local time")
}
