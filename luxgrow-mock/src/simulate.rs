use std::f64::consts::PI;

use rand::Rng;

/// Greenhouse illuminance over a day, in lux. Peaks around noon well above
/// the bright threshold so the auto mode has something to react to.
pub fn simulated_lux(day_fraction: f64) -> f64 {
    const MAX_SUNLIGHT_LUX: f64 = 30000.0;
    const NIGHT_LUX: f64 = 5.0;

    const SUNRISE: f64 = 0.25;
    const SUNSET: f64 = 0.75;

    if (SUNRISE..=SUNSET).contains(&day_fraction) {
        let daylight = (day_fraction - SUNRISE) / (SUNSET - SUNRISE);
        ((daylight * PI).sin() * MAX_SUNLIGHT_LUX).max(NIGHT_LUX)
    } else {
        NIGHT_LUX
    }
}

pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    // coolest around 3 AM, warmest around 3 PM
    22.0 - (radians - PI / 4.0).cos() * 6.0
}

pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    if (0.3..=0.7).contains(&day_fraction) {
        ((radians.sin().max(0.0) * 25.0) + 65.0).round()
    } else {
        ((radians.cos().max(0.0) * 30.0) + 60.0).round()
    }
}

/// Adds uniform noise of up to `spread` either way.
pub fn jitter(value: f64, spread: f64) -> f64 {
    value + rand::rng().random_range(-spread..=spread)
}
