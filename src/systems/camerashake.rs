use bevy_ecs::prelude::*;

use crate::resources::camerashake::CameraShake;
use crate::resources::worldtime::WorldTime;

pub fn camera_shake_decay(time: Res<WorldTime>, shake: Option<ResMut<CameraShake>>) {
    if let Some(mut shake) = shake {
        shake.decay(time.delta);
    }
}
