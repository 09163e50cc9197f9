use dwd_wfs::{Domain, DwdClient, DwdError};

#[tokio::main]
async fn main() -> Result<(), DwdError> {
    let client = DwdClient::new()?;

    for domain in [Domain::PollenFlight, Domain::BioWeather] {
        let cells = client.list_cells(domain).await?;
        println!("{}: {} cells", domain, cells.len());
        for cell in cells {
            println!("{:>12} {}", cell.id, cell.name);
        }
    }

    Ok(())
}
