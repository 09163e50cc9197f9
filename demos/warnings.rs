use dwd_wfs::{DwdClient, DwdError, LatLon};

#[tokio::main]
async fn main() -> Result<(), DwdError> {
    let client = DwdClient::new()?;

    let mut warnings = client
        .weather_warnings(LatLon(51.34854410136008, 12.371143867332414))
        .await;
    println!("{}", warnings);

    if let Some(current) = warnings.current_warnings() {
        for warning in current {
            println!(
                "[{}] {} ({:?} - {:?})",
                warning.level,
                warning.headline.as_deref().unwrap_or("-"),
                warning.start_time,
                warning.end_time,
            );
        }
    }

    warnings.update().await;
    println!("Last update: {:?}", warnings.last_update());

    let pollen = client.pollen_flight("Rhein-Main").await;
    println!("{} ({:?})", pollen, pollen.cell_name());

    let bioweather = client.bioweather(7).await;
    println!("{} ({:?})", bioweather, bioweather.cell_name());

    Ok(())
}
