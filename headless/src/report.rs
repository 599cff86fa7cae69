use bevy::prelude::*;
use bevy_log::{debug, info};
use water_strip::WaterStrip;

/// When the headless run stops and how often it reports.
#[derive(Resource, Debug, Clone)]
pub struct RunBudget {
    pub ticks: u64,
    pub report_every: u64,
    pub until_calm: Option<f32>,
}

/// Min, max and mean height of the strip.
pub fn summarize(strip: &WaterStrip) -> (f32, f32, f32) {
    let (min, max, sum) = strip.heights().fold(
        (f32::INFINITY, f32::NEG_INFINITY, 0.0_f32),
        |(min, max, sum), h| (min.min(h), max.max(h), sum + h),
    );
    (min, max, sum / strip.width() as f32)
}

pub fn report_surface(
    strip: Res<WaterStrip>,
    run: Res<RunBudget>,
    mut exit: EventWriter<AppExit>,
) {
    let tick = strip.step_count();

    if run.report_every > 0 && tick % run.report_every == 0 {
        let (min, max, mean) = summarize(&strip);
        info!("tick {tick}: min {min:.4} max {max:.4} mean {mean:.4}");
        debug!("heights: {:?}", strip.heights().collect::<Vec<_>>());
    }

    if let Some(epsilon) = run.until_calm {
        if strip.is_calm(epsilon) {
            info!("Water settled after {tick} ticks");
            exit.write(AppExit::Success);
            return;
        }
    }

    if tick >= run.ticks {
        info!(
            "Tick budget reached, max displacement {:.4}",
            strip.max_displacement()
        );
        exit.write(AppExit::Success);
    }
}
