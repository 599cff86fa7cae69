use std::time::Duration;

use bevy::prelude::*;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::info;
use water_strip::{Splash, SplashEvent, WaterStripConfig, WaterStripPlugin, WaterStripSet};

use crate::report::{report_surface, RunBudget};

/// Splashes given on the command line, sent once at startup.
#[derive(Resource, Debug, Default)]
pub struct InitialSplashes(pub Vec<Splash>);

fn send_initial_splashes(splashes: Res<InitialSplashes>, mut events: EventWriter<SplashEvent>) {
    for splash in &splashes.0 {
        events.write(SplashEvent::from(*splash));
    }
}

pub fn build_app(
    config: WaterStripConfig,
    splashes: Vec<Splash>,
    run: RunBudget,
    tick_rate: u64,
) -> water_strip::Result<App> {
    let plugin = WaterStripPlugin::new(&config)?;
    let tick = Duration::from_secs_f64(1.0 / tick_rate as f64);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)));
    app.add_plugins(bevy::log::LogPlugin::default());
    app.add_plugins(plugin);

    app.insert_resource(Time::<Fixed>::from_duration(tick));
    app.insert_resource(InitialSplashes(splashes));
    app.insert_resource(run);

    app.add_systems(Startup, send_initial_splashes);
    app.add_systems(FixedUpdate, report_surface.after(WaterStripSet::Simulate));

    info!(
        "Starting water strip: {} columns, spacing {}, {:?}",
        config.width, config.column_spacing, config.params
    );

    Ok(app)
}

pub fn init(
    config: WaterStripConfig,
    splashes: Vec<Splash>,
    run: RunBudget,
    tick_rate: u64,
) -> water_strip::Result<()> {
    let mut app = build_app(config, splashes, run, tick_rate)?;
    app.run();
    Ok(())
}
