use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use flow_core::{
    seeded, ArcPlacement, EngineConfig, FlowEngine, FlowEvent, RemovalReason, ScalingPolicy, Viewport,
    DEFAULT_SOURCES,
};

/// Run the data machine flow engine headlessly and report capacity usage.
#[derive(Parser, Debug)]
#[command(name = "flow-sim", version)]
struct Args {
    /// Viewport as WIDTHxHEIGHT.
    #[arg(long, default_value = "1920x1080")]
    viewport: String,

    /// Simulated run time in seconds.
    #[arg(long, default_value_t = 600.0)]
    seconds: f64,

    /// Simulation step in milliseconds (one animation frame).
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Resize events as SECONDS:WIDTHxHEIGHT, repeatable.
    #[arg(long = "resize")]
    resizes: Vec<String>,

    /// Use the cover (max of ratios) scaling policy instead of fit.
    #[arg(long)]
    cover: bool,

    /// Put the first source at 12 o'clock instead of centring the gap at the bottom.
    #[arg(long)]
    top_first: bool,
}

#[derive(Default, Debug)]
struct Stats {
    created: usize,
    completed: usize,
    torn_down: usize,
    highlight_changes: usize,
    peak_per_source: Vec<usize>,
    peak_output: usize,
    peak_live: usize,
}

fn parse_viewport(s: &str) -> anyhow::Result<Viewport> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("viewport `{s}` is not WIDTHxHEIGHT"))?;
    let width: f32 = w.trim().parse().with_context(|| format!("bad width in `{s}`"))?;
    let height: f32 = h.trim().parse().with_context(|| format!("bad height in `{s}`"))?;
    if width <= 0.0 || height <= 0.0 {
        bail!("viewport `{s}` must be positive");
    }
    Ok(Viewport::new(width, height))
}

fn parse_resize(s: &str) -> anyhow::Result<(Duration, Viewport)> {
    let (at, vp) = s
        .split_once(':')
        .with_context(|| format!("resize `{s}` is not SECONDS:WIDTHxHEIGHT"))?;
    let secs: f64 = at.trim().parse().with_context(|| format!("bad time in `{s}`"))?;
    if !secs.is_finite() || secs < 0.0 {
        bail!("resize time in `{s}` must be a non-negative number of seconds");
    }
    Ok((Duration::from_secs_f64(secs), parse_viewport(vp)?))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let viewport = parse_viewport(&args.viewport)?;
    let mut resizes = args
        .resizes
        .iter()
        .map(|s| parse_resize(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    resizes.sort_by_key(|(at, _)| *at);

    let mut config = EngineConfig::default();
    if args.cover {
        config.geometry.scaling_policy = ScalingPolicy::Cover;
    }
    if args.top_first {
        config.geometry.arc_placement = ArcPlacement::EndOfSweep;
    }
    let limits = config.limits.clone();
    let sources = DEFAULT_SOURCES.to_vec();
    let source_count = sources.len();
    let mut engine = FlowEngine::new(config, sources, seeded(args.seed))?;

    let mut events = Vec::new();
    engine.resize(viewport, &mut events);

    let step = Duration::from_millis(args.step_ms.max(1));
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        bail!("--seconds must be a non-negative number");
    }
    let end = Duration::from_secs_f64(args.seconds);
    let mut stats = Stats {
        peak_per_source: vec![0; source_count],
        ..Default::default()
    };
    let mut pending_resizes = resizes.into_iter().peekable();

    while engine.now() < end {
        while let Some((at, vp)) = pending_resizes.next_if(|(at, _)| *at <= engine.now()) {
            log::info!("[sim] resize at {:.2}s", at.as_secs_f64());
            engine.resize(vp, &mut events);
        }
        engine.tick(step, &mut events);
        for ev in events.drain(..) {
            match ev {
                FlowEvent::Created { .. } => stats.created += 1,
                FlowEvent::Removed {
                    reason: RemovalReason::Completed,
                    ..
                } => stats.completed += 1,
                FlowEvent::Removed {
                    reason: RemovalReason::Teardown,
                    ..
                } => stats.torn_down += 1,
                FlowEvent::HighlightChanged { .. } => stats.highlight_changes += 1,
                FlowEvent::Updated { .. } | FlowEvent::GeometryChanged { .. } => {}
            }
        }

        let registry = engine.registry();
        for (i, peak) in stats.peak_per_source.iter_mut().enumerate() {
            *peak = (*peak).max(registry.source_count(i));
        }
        stats.peak_output = stats.peak_output.max(registry.output_count());
        stats.peak_live = stats.peak_live.max(engine.live_count());
    }

    log::info!(
        "[sim] {:.1}s simulated: created={} completed={} torn_down={} highlight_changes={}",
        engine.now().as_secs_f64(),
        stats.created,
        stats.completed,
        stats.torn_down,
        stats.highlight_changes
    );
    log::info!(
        "[sim] peaks: per_source={:?} (cap {}) output={} (cap {}) live={}",
        stats.peak_per_source,
        limits.max_per_source,
        stats.peak_output,
        limits.max_output,
        stats.peak_live
    );

    if stats.peak_per_source.iter().any(|p| *p > limits.max_per_source)
        || stats.peak_output > limits.max_output
    {
        bail!("particle caps exceeded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resize_events() {
        let (at, vp) = parse_resize("2.5:800x600").unwrap();
        assert_eq!(at, Duration::from_millis(2500));
        assert_eq!(vp, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn rejects_bad_resize_times() {
        for bad in ["-1:800x600", "NaN:800x600", "inf:800x600", "soon:800x600"] {
            assert!(parse_resize(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn rejects_bad_viewports() {
        for bad in ["800", "0x600", "800x-1", "axb"] {
            assert!(parse_viewport(bad).is_err(), "{bad}");
        }
        assert!(parse_resize("1:0x0").is_err());
    }
}
