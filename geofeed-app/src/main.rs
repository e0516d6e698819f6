use anyhow::{bail, Context};
use futures::stream::{self, Stream, StreamExt};
use geofeed::{Driver, JsonLinesSink, LatLng, SessionConfig, Viewport, WikipediaGeoSource};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Headless discovery session.
///
/// Queries around the configured start center on load, then treats every
/// `lat,lng` line on stdin as a settled viewport. Each time the known set
/// grows, the full GeoJSON FeatureCollection is written to stdout as one line.
///
/// Usage: `geofeed-app [config.json] < centers.txt`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    geofeed::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {path}"))?;
            SessionConfig::from_json_str(&json)
                .with_context(|| format!("invalid config {path}"))?
        }
        None => SessionConfig::default(),
    };

    let source = WikipediaGeoSource::new(&config.source)?;
    log::info!(
        "querying {} within {}m of each settled center",
        source.endpoint(),
        config.driver.radius_m
    );

    let sink = JsonLinesSink::new(std::io::stdout());
    let mut driver = Driver::new(source, sink, config.driver.clone())?;

    let load = stream::once(futures::future::ready(Viewport::new(config.start_center)));
    let stats = driver.run(load.chain(stdin_viewports())).await;

    log::info!(
        "{} articles discovered over {} cycles ({} failed)",
        stats.total_points,
        stats.cycles,
        stats.failed
    );
    Ok(())
}

/// Settled viewports read from stdin, one per line, until EOF
fn stdin_viewports() -> impl Stream<Item = Viewport> {
    let lines = BufReader::new(tokio::io::stdin()).lines();
    stream::unfold(lines, |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_center(&line) {
                    Ok(Some(center)) => return Some((Viewport::new(center), lines)),
                    Ok(None) => continue,
                    Err(e) => log::warn!("ignoring line {:?}: {}", line, e),
                },
                Ok(None) => return None,
                Err(e) => {
                    log::error!("failed to read stdin: {}", e);
                    return None;
                }
            }
        }
    })
}

/// Parses `lat,lng`. Blank lines and `#` comments yield `None`.
fn parse_center(line: &str) -> anyhow::Result<Option<LatLng>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some((lat, lng)) = line.split_once(',') else {
        bail!("expected `lat,lng`");
    };
    let lat: f64 = lat.trim().parse().context("latitude is not a number")?;
    let lng: f64 = lng.trim().parse().context("longitude is not a number")?;

    let center = LatLng::new(lat, lng);
    if !center.is_valid() {
        bail!("coordinate out of range");
    }
    Ok(Some(center))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_center() {
        assert_eq!(
            parse_center(" 53.22, 6.56 ").unwrap(),
            Some(LatLng::new(53.22, 6.56))
        );
        assert_eq!(parse_center("").unwrap(), None);
        assert_eq!(parse_center("# Groningen").unwrap(), None);
        assert!(parse_center("53.22").is_err());
        assert!(parse_center("north,6.56").is_err());
        assert!(parse_center("53.22,6.56,1").is_err());
        assert!(parse_center("91,0").is_err());
    }
}
