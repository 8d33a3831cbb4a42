//! The single-shot pipeline driver: stdin in, at most one sound out, exit 0.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cuecast_audio::{AudioSource, BackendKind, CancellationToken, build_backend};
use cuecast_codec::DecoderRegistry;
use cuecast_config::Config;
use cuecast_soundpack::{PathMapper, Resolution, SoundpackResolver};
use cuecast_telemetry::{CandidateLookup, HookEventRecord, open_if_enabled};

/// CLI-layer overrides applied on top of the loaded [`Config`], mirroring
/// the default hook invocation's documented flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub silent: bool,
    pub volume: Option<f32>,
    pub soundpack: Option<String>,
}

/// Runs the full hook pipeline once and always returns 0, per the
/// documented "never break the host" exit status policy.
pub fn run(config: Config, overrides: Overrides) -> i32 {
    let silent = !config.enabled || overrides.silent;
    if silent {
        tracing::debug!("silent mode: running the pipeline for tracking only, no playback");
    }

    let event = match cuecast_core::read_hook_event(std::io::stdin()) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse hook event from stdin");
            return 0;
        }
    };

    let ctx = cuecast_core::classify(&event);
    let mapped = cuecast_core::map_sound(&ctx);

    tracing::debug!(
        tool = ctx.tool_name,
        category = ?ctx.category,
        candidates = mapped.all_paths.len(),
        "classified hook event"
    );

    let soundpack_id = overrides
        .soundpack
        .clone()
        .unwrap_or_else(|| config.default_soundpack.clone());
    let mapper = match build_mapper(&soundpack_id, &config) {
        Ok(mapper) => mapper,
        Err(err) => {
            tracing::warn!(error = %err, soundpack = soundpack_id, "failed to load soundpack");
            return 0;
        }
    };

    let resolution = SoundpackResolver::new(&mapper).resolve(&mapped);

    let mut telemetry = open_if_enabled(
        config.sound_tracking.enabled,
        config.sound_tracking.db_path.as_ref(),
        &cuecast_platform::data_dir().join("telemetry.db"),
    );

    let (selected_path, fallback_level) = match &resolution {
        Resolution::Found { path, fallback_level } => (Some(path.display().to_string()), Some(*fallback_level)),
        Resolution::NotFound => (None, None),
    };

    record_telemetry(
        telemetry.as_mut(),
        &event,
        &ctx,
        &mapped,
        selected_path.clone(),
        fallback_level,
        &resolution,
    );

    let path = match resolution {
        Resolution::Found { path, .. } => path,
        Resolution::NotFound => {
            tracing::info!(soundpack = soundpack_id, "no sound resolved for this event");
            return 0;
        }
    };

    if silent {
        return 0;
    }

    let volume = overrides.volume.unwrap_or(config.volume).clamp(0.0, 1.0);
    play(&path, volume, &config);
    0
}

fn build_mapper(soundpack_id: &str, config: &Config) -> Result<PathMapper, Box<dyn std::error::Error>> {
    let as_path = PathBuf::from(soundpack_id);
    if as_path.is_absolute() && as_path.extension().is_some_and(|ext| ext == "json") {
        return Ok(cuecast_soundpack::load_doc(&as_path)?);
    }

    let mut bases: Vec<PathBuf> = config.soundpack_paths.iter().map(PathBuf::from).collect();
    bases.push(cuecast_platform::data_dir().join("soundpacks").join(soundpack_id));
    Ok(PathMapper::directory(soundpack_id, bases))
}

fn play(path: &std::path::Path, volume: f32, config: &Config) {
    let registry = DecoderRegistry::default();
    let token = CancellationToken::new();

    let signal_token = token.clone();
    let _ = ctrlc::set_handler(move || signal_token.cancel());

    let kind = match BackendKind::parse(&config.audio_backend) {
        Ok(kind) => kind,
        Err(err) => {
            tracing::warn!(error = %err, "invalid audio_backend, falling back to auto");
            BackendKind::Auto
        }
    };

    let is_wsl = cuecast_platform::is_wsl();
    let mut backend = match build_backend(kind, is_wsl, cuecast_platform::find_on_path) {
        Ok(backend) => backend,
        Err(err) => {
            tracing::warn!(error = %err, "no backend available, skipping playback");
            return;
        }
    };

    backend.set_volume(volume);
    let source = AudioSource::FilePath(path.to_path_buf());
    if let Err(err) = backend.play(&token, source, &registry) {
        tracing::warn!(error = %err, "playback failed");
    }
    if let Err(err) = backend.close() {
        tracing::warn!(error = %err, "failed to close audio backend");
    }
}

fn record_telemetry(
    sink: Option<&mut cuecast_telemetry::TelemetrySink>,
    event: &cuecast_core::HookEvent,
    ctx: &cuecast_core::EventContext,
    mapped: &cuecast_core::MappedSound,
    selected_path: Option<String>,
    fallback_level: Option<usize>,
    resolution: &Resolution,
) {
    let Some(sink) = sink else { return };

    let candidates = mapped
        .all_paths
        .iter()
        .enumerate()
        .map(|(index, logical)| {
            let sequence = (index + 1) as u32;
            let rule = mapped.rule_numbers[index];
            let found = matches!(resolution, Resolution::Found { fallback_level, .. } if *fallback_level == rule);
            CandidateLookup {
                path: logical.as_str().to_string(),
                sequence,
                found,
            }
        })
        .collect();

    let context_json = serde_json::to_string(&serde_json::json!({
        "category": format!("{:?}", ctx.category),
        "tool_name": ctx.tool_name,
        "operation": ctx.operation,
        "is_success": ctx.is_success,
        "has_error": ctx.has_error,
    }))
    .unwrap_or_default();

    let record = HookEventRecord {
        session_id: event.session_id.clone().unwrap_or_default(),
        tool_name: if ctx.tool_name.is_empty() { None } else { Some(ctx.tool_name.clone()) },
        selected_path,
        fallback_level: fallback_level.map(|level| level as u32),
        context: context_json,
        timestamp: now_unix(),
        candidates,
    };

    if let Err(err) = sink.record(&record) {
        tracing::warn!(error = %err, "failed to record telemetry row");
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
