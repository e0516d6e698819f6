use geofeed::{DataSourceError, GeoSearchConfig, GeoSource, LatLng, PoiId, WikipediaGeoSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one canned HTTP response and hands back the raw request
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/w/api.php", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (endpoint, rx)
}

fn source_for(endpoint: String) -> WikipediaGeoSource {
    let config = GeoSearchConfig {
        endpoint: Some(endpoint),
        ..GeoSearchConfig::for_testing()
    };
    WikipediaGeoSource::new(&config).unwrap()
}

#[tokio::test]
async fn query_issues_one_anonymous_geosearch_request() {
    let body = r#"{"batchcomplete":"","query":{"geosearch":[
        {"pageid":101,"ns":0,"title":"Martinitoren","lat":53.2193,"lon":6.5682,"dist":10.2,"primary":""},
        {"pageid":102,"ns":0,"title":"Der Aa-kerk","lat":53.2186,"lon":6.5625,"dist":380.7,"primary":""}
    ]}}"#;
    let (endpoint, request_rx) = serve_once("200 OK", body).await;
    let source = source_for(endpoint);

    let pois = source.query(LatLng::new(53.22, 6.56), 5000, 500).await.unwrap();
    assert_eq!(pois.len(), 2);
    assert_eq!(pois[0].id(), &PoiId::Page(101));
    assert_eq!(pois[1].title(), "Der Aa-kerk");

    let request = request_rx.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /w/api.php?"));
    for param in [
        "format=json",
        "action=query",
        "list=geosearch",
        "gsprimary=all",
        "gsradius=5000",
        "gscoord=53.22%7C6.56",
        "gslimit=500",
    ] {
        assert!(request_line.contains(param), "missing {param} in {request_line}");
    }

    let lowered = request.to_ascii_lowercase();
    assert!(!lowered.contains("\r\ncookie:"));
    assert!(!lowered.contains("\r\nauthorization:"));
}

#[tokio::test]
async fn non_success_status_is_a_data_source_error() {
    let (endpoint, _request_rx) = serve_once("503 Service Unavailable", "{}").await;
    let source = source_for(endpoint);

    let err = source.query(LatLng::new(53.22, 6.56), 5000, 500).await.unwrap_err();
    assert!(matches!(err, DataSourceError::Status(503)));
}

#[tokio::test]
async fn api_error_body_is_a_data_source_error() {
    let body = r#"{"error":{"code":"toomanyvalues","info":"Too many values supplied"}}"#;
    let (endpoint, _request_rx) = serve_once("200 OK", body).await;
    let source = source_for(endpoint);

    let err = source.query(LatLng::new(53.22, 6.56), 5000, 500).await.unwrap_err();
    assert!(matches!(err, DataSourceError::Api { ref code, .. } if code == "toomanyvalues"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/w/api.php", listener.local_addr().unwrap());
    drop(listener);

    let err = source_for(endpoint)
        .query(LatLng::new(53.22, 6.56), 5000, 500)
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::Network(_)));
}

#[tokio::test]
async fn invalid_center_is_rejected_before_any_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/w/api.php", listener.local_addr().unwrap());
    drop(listener);

    let err = source_for(endpoint)
        .query(LatLng::new(-95.0, 6.56), 5000, 500)
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::InvalidRequest(_)));
}
