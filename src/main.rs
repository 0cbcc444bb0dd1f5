//! Sightline: runs the target tracker over the demo voxel world.

use bevy::prelude::*;
use target_tracker::prelude::*;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();
    let settings = match tracker_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("sightline: {err}");
            return AppExit::error();
        }
    };

    TrackerBuilder::new().settings(settings).build().run()
}
