// SPDX-License-Identifier: MPL-2.0
use image_enhancer::app::config::{self, Config};
use image_enhancer::domain::AdjustmentKind;
use image_enhancer::error::{DownloadError, UploadError};
use image_enhancer::i18n::fluent::I18n;
use image_enhancer::media::{read_upload, DEFAULT_MAX_UPLOAD_BYTES};
use image_enhancer::session::{Screen, Studio};
use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const MIB: usize = 1024 * 1024;

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 200, 255])
    })
    .save_with_format(path, ImageFormat::Png)
    .expect("write png");
}

fn studio_for(download_dir: &Path) -> Studio {
    let mut config = Config::default();
    config.download.directory = Some(download_dir.to_path_buf());
    Studio::new(config.studio_options())
}

#[test]
fn upload_adjust_download_round() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let input = dir.path().join("input.png");
    write_png(&input, 32, 24);
    let out_dir = dir.path().join("downloads");

    let mut studio = studio_for(&out_dir);
    let source = read_upload(&input, studio.max_upload_bytes());
    studio.accept_upload(source);
    assert_eq!(studio.screen(), Screen::Enhance);
    studio.render_now().expect("initial render");
    assert!(!studio.enhancement_applied());

    studio.set_adjustment(AdjustmentKind::Brightness, 130);
    studio.set_adjustment(AdjustmentKind::Sharpness, 60);
    studio.set_adjustment(AdjustmentKind::Blur, 10);
    studio.render_now().expect("adjusted render");
    assert!(studio.enhancement_applied());

    let saved = studio.download(Instant::now()).expect("download");
    assert_eq!(saved, out_dir.join("enhanced-image.jpg"));

    let written = fs::read(&saved).expect("read download");
    let rendered = studio
        .session()
        .and_then(|s| s.rendered())
        .expect("rendered image");
    assert_eq!(written, rendered.bytes());

    let decoded = image_rs::load_from_memory(&written).expect("decode jpeg");
    assert_eq!((decoded.width(), decoded.height()), (32, 24));
}

#[test]
fn nine_mib_upload_is_accepted() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("big.jpg");
    fs::write(&path, vec![0u8; 9 * MIB]).expect("write fixture");

    let mut studio = Studio::default();
    studio.accept_upload(read_upload(&path, DEFAULT_MAX_UPLOAD_BYTES));
    assert_eq!(studio.screen(), Screen::Enhance);
    assert!(studio.upload_error().is_none());
}

#[test]
fn eleven_mib_upload_is_rejected_with_message() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("huge.jpg");
    fs::write(&path, vec![0u8; 11 * MIB]).expect("write fixture");

    let mut studio = Studio::default();
    studio.accept_upload(read_upload(&path, DEFAULT_MAX_UPLOAD_BYTES));

    assert_eq!(studio.screen(), Screen::Upload);
    let err = studio.upload_error().expect("upload error");
    assert!(matches!(err, UploadError::FileTooLarge { .. }));
    assert_eq!(err.to_string(), "Image file size must be less than 10MB");
}

#[test]
fn second_download_after_cooldown_gets_unique_name() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let input = dir.path().join("input.png");
    write_png(&input, 8, 8);

    let mut studio = studio_for(dir.path());
    studio.accept_upload(read_upload(&input, DEFAULT_MAX_UPLOAD_BYTES));
    studio.render_now().expect("render");

    let start = Instant::now();
    let first = studio.download(start).expect("first download");
    assert_eq!(studio.download(start), Err(DownloadError::InFlight));

    let later = start + Duration::from_millis(1500);
    assert!(studio.tick(later));
    let second = studio.download(later).expect("second download");

    assert_ne!(first, second);
    assert_eq!(
        second.file_name().and_then(|n| n.to_str()),
        Some("enhanced-image (1).jpg")
    );
}

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");
    let loaded = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("controls-reset-button"), "Reset to Default");

    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");
    let loaded = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("controls-reset-button"), "Réinitialiser");
}

#[test]
fn configured_upload_limit_is_enforced() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("settings.toml"),
        "[upload]\nmax_file_size_mb = 1\n",
    )
    .expect("write config");
    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let path = dir.path().join("two.png");
    fs::write(&path, vec![0u8; 2 * MIB]).expect("write fixture");

    let mut studio = Studio::new(config.studio_options());
    studio.accept_upload(read_upload(&path, studio.max_upload_bytes()));
    assert_eq!(
        studio.upload_error().map(ToString::to_string).as_deref(),
        Some("Image file size must be less than 1MB")
    );
}
