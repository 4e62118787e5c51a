//! Shared test utilities for FocusQuest.
//!
//! This module provides common setup functions used across test modules.

#![cfg(test)]

use crate::db::{migrations, Database};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied.
///
/// Returns a tuple of (Database, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Write a small solid-color PNG into `dir` and return its path.
pub fn write_test_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_pixel(4, 3, Rgba([200, 40, 40, 255]));
    img.save(&path).expect("Failed to write test PNG");
    path
}

/// Write a file that is not a decodable image and return its path.
pub fn write_garbage_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not an image").expect("Failed to write garbage file");
    path
}
