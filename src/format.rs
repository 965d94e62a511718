//! Rendering of weather snapshots into fixed-format text blocks
//!
//! The rendered report is what the LLM receives as tool output: one block of
//! current conditions followed by one block per forecast day, joined by a
//! literal separator line. Temperatures, wind speed, and UV index render as
//! whole numbers, precipitation to one decimal, and the probability of
//! precipitation as a whole percentage.

use chrono::DateTime;

use crate::models::{CurrentConditions, DailyForecast, Location, WeatherSnapshot};

/// Literal line separating rendered blocks
pub const BLOCK_SEPARATOR: &str = "\n####\n";

/// Render the full report: current conditions plus one block per forecast
/// day. Daily index 0 duplicates today and is skipped, so an 8-entry daily
/// array renders as 1 current + 7 forecast blocks.
#[must_use]
pub fn render_report(location: &Location, snapshot: &WeatherSnapshot) -> String {
    let mut blocks = vec![current_block(location, snapshot)];
    blocks.extend(
        snapshot
            .daily
            .iter()
            .skip(1)
            .map(|day| forecast_block(day, snapshot.timezone_offset)),
    );
    blocks.join(BLOCK_SEPARATOR)
}

fn current_block(location: &Location, snapshot: &WeatherSnapshot) -> String {
    let current: &CurrentConditions = &snapshot.current;
    format!(
        "Location: {location}\n\
         Current time at this location is {time}.\n\
         Current weather is {weather} with a temperature of {temp:.0}°C, \
         humidity of {humidity:.0}%, UV index of {uvi:.0}, \
         cloud coverage of {clouds:.0}%, wind speed of {wind_speed:.0} m/s.\n\
         There is {rain:.1} mm/h of rain and {snow:.1} mm/h of snow.",
        location = location.display_name(),
        time = local_timestamp(current.dt, snapshot.timezone_offset, "%A %Y-%m-%d %H:%M"),
        weather = current.description(),
        temp = current.temp,
        humidity = current.humidity,
        uvi = current.uvi,
        clouds = current.clouds,
        wind_speed = current.wind_speed,
        rain = current.rain,
        snow = current.snow,
    )
}

fn forecast_block(forecast: &DailyForecast, timezone_offset: i64) -> String {
    format!(
        "Date: {date}\n\
         Weather summary: {summary}\n\
         Weather is {weather} with a temperature of {morn:.0}°C in the morning, \
         {day:.0}°C at day, {eve:.0}°C in the evening, and {night:.0}°C at night.\n\
         Humidity is {humidity:.0}%, the UV index is {uvi:.0}, \
         cloud coverage is {clouds:.0}%, wind speed is {wind_speed:.0} m/s.\n\
         The Probability of precipitation is {pop:.0}%. \
         There is total volume of {rain:.1} mm of rain and {snow:.1} mm of snow.",
        date = local_timestamp(forecast.dt, timezone_offset, "%A %Y-%m-%d"),
        summary = forecast.summary,
        weather = forecast.description(),
        morn = forecast.temp.morn,
        day = forecast.temp.day,
        eve = forecast.temp.eve,
        night = forecast.temp.night,
        humidity = forecast.humidity,
        uvi = forecast.uvi,
        clouds = forecast.clouds,
        wind_speed = forecast.wind_speed,
        pop = forecast.pop * 100.0,
        rain = forecast.rain,
        snow = forecast.snow,
    )
}

/// Format a unix timestamp shifted by the provider's timezone offset.
/// Falls back to the epoch for out-of-range values rather than failing the
/// whole report.
fn local_timestamp(dt: i64, timezone_offset: i64, fmt: &str) -> String {
    DateTime::from_timestamp(dt + timezone_offset, 0)
        .unwrap_or_default()
        .format(fmt)
        .to_string()
}

#[cfg(test)]
mod tests {
    use crate::models::{Condition, DayTemperatures};

    use super::*;

    fn sample_location() -> Location {
        Location {
            name: "London".to_string(),
            state: None,
            country: "GB".to_string(),
            latitude: 51.5073,
            longitude: -0.1277,
        }
    }

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            // 2024-06-01 12:00:00 UTC
            dt: 1_717_243_200,
            temp: 18.6,
            humidity: 62.0,
            uvi: 4.3,
            clouds: 40.0,
            wind_speed: 3.7,
            rain: 0.0,
            snow: 0.0,
            weather: vec![Condition {
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            }],
        }
    }

    fn sample_day(dt: i64) -> DailyForecast {
        DailyForecast {
            dt,
            summary: "Partly cloudy through the day".to_string(),
            temp: DayTemperatures {
                morn: 12.2,
                day: 19.8,
                eve: 17.1,
                night: 11.4,
            },
            humidity: 58.0,
            uvi: 5.6,
            clouds: 35.0,
            wind_speed: 4.2,
            pop: 0.35,
            rain: 1.25,
            snow: 0.0,
            weather: vec![Condition {
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
        }
    }

    fn sample_snapshot(days: usize) -> WeatherSnapshot {
        WeatherSnapshot {
            current: sample_current(),
            daily: (0..days as i64)
                .map(|i| sample_day(1_717_243_200 + i * 86_400))
                .collect(),
            timezone_offset: 3600,
        }
    }

    #[test]
    fn current_block_renders_template() {
        let report = render_report(&sample_location(), &sample_snapshot(0));
        assert!(report.starts_with("Location: London, GB\n"));
        // 12:00 UTC plus the 3600s offset, with the weekday spelled out
        assert!(report.contains("Current time at this location is Saturday 2024-06-01 13:00."));
        assert!(report.contains(
            "Current weather is scattered clouds with a temperature of 19°C, \
             humidity of 62%, UV index of 4, cloud coverage of 40%, \
             wind speed of 4 m/s."
        ));
        assert!(report.contains("There is 0.0 mm/h of rain and 0.0 mm/h of snow."));
    }

    #[test]
    fn forecast_block_renders_template() {
        let report = render_report(&sample_location(), &sample_snapshot(2));
        assert!(report.contains("Date: Sunday 2024-06-02"));
        assert!(report.contains("Weather summary: Partly cloudy through the day"));
        assert!(report.contains(
            "Weather is light rain with a temperature of 12°C in the morning, \
             20°C at day, 17°C in the evening, and 11°C at night."
        ));
        assert!(report.contains("Humidity is 58%, the UV index is 6,"));
        assert!(report.contains("The Probability of precipitation is 35%."));
        assert!(report.contains("There is total volume of 1.2 mm of rain and 0.0 mm of snow."));
    }

    #[test]
    fn report_skips_today_and_renders_seven_forecast_blocks() {
        let report = render_report(&sample_location(), &sample_snapshot(8));
        assert_eq!(report.matches("####").count(), 7);
        assert_eq!(report.matches("Date: ").count(), 7);
        // index 0 duplicates today, so its date never appears as a block
        assert!(!report.contains("Date: Saturday 2024-06-01"));
        assert!(report.contains("Date: Sunday 2024-06-02"));
        assert!(report.contains("Date: Saturday 2024-06-08"));
    }

    #[test]
    fn us_location_renders_with_state() {
        let location = Location {
            name: "Ontario".to_string(),
            state: Some("NY".to_string()),
            country: "US".to_string(),
            latitude: 43.25,
            longitude: -77.31,
        };
        let report = render_report(&location, &sample_snapshot(0));
        assert!(report.starts_with("Location: Ontario, NY, US\n"));
    }
}
