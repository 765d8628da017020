use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Atlantic::Azores;

use light_geolocator::config::GeolocationConfig;
use light_geolocator::pipeline::{run_batch, BatchSummary, IndividualInput, IndividualOutcome};
use light_geolocator::simulate::{simulate_light_series, simulate_twilights};
use light_geolocator::types::{LightSeries, SiteCoordinate};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = GeolocationConfig::default();
    let colony = SiteCoordinate::new(38.5, -28.6).unwrap();
    let true_elevation = -4.5;
    let days = 40;

    // Loggers switched on at local midnight on the colony.
    let deployed = Azores
        .with_ymd_and_hms(2026, 5, 1, 0, 0, 0)
        .unwrap()
        .with_timezone(&Utc);

    let twilights = simulate_twilights(
        &colony,
        true_elevation,
        deployed.date_naive(),
        days,
        &config.predictor,
    );
    let series = simulate_light_series(
        &twilights,
        deployed,
        deployed + Duration::days(i64::from(days)),
        Duration::minutes(5),
        64.0,
        0.0,
    );

    let inputs = vec![
        IndividualInput {
            id: "CORY-01".to_string(),
            series: series.clone(),
            site: colony,
        },
        IndividualInput {
            id: "CORY-02".to_string(),
            series: LightSeries::slice(&series.samples()[..60]),
            site: colony,
        },
    ];

    let outcomes = run_batch(&inputs, &config);

    println!("=== Light-Level Geolocation Example ===");
    println!(
        "Colony: ({:.1}°N, {:.1}°W), deployed {} ({})",
        colony.latitude,
        -colony.longitude,
        deployed.with_timezone(&Azores),
        deployed
    );
    println!("True sun elevation at threshold: {:.2}°", true_elevation);
    println!();

    for outcome in &outcomes {
        match outcome {
            IndividualOutcome::Completed(report) => {
                println!("--- {} ---", report.id);
                println!(
                    "Calibration window: {} to {} ({} days, {} twilights)",
                    report.window.start,
                    report.window.end,
                    report.window.duration_days,
                    report.window.event_count
                );
                println!(
                    "Calibrated sun elevation: {:.2}° (median residual {:.2} min)",
                    report.calibration.sun_elevation_degrees,
                    report.calibration.fit_residual
                );
                println!(
                    "Deployment twilights: {} kept, {} removed",
                    report.deployment_twilights.events.len(),
                    report.deployment_twilights.removed()
                );
                for p in report.positions.iter().take(5) {
                    println!(
                        "  {}  lon {:8.3}°  lat {:7.3}°",
                        p.timestamp, p.longitude, p.latitude
                    );
                }
                if let Some(summary) = &report.summary {
                    println!(
                        "Mean of {} positions: lon {:.3}°, lat {:.3}°",
                        summary.positions, summary.mean_longitude, summary.mean_latitude
                    );
                }
            }
            IndividualOutcome::Failed(failure) => {
                println!("--- {} ---", failure.id);
                println!("Skipped: {}", failure);
            }
        }
        println!();
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    println!("Completed: {}, failed: {}", summary.completed, summary.failed);
}
