use async_trait::async_trait;
use flights_core::{
    Airport, Config, FetchError, FlightDataProvider, FlightradarClient, Report, Runner, USAGE_HINT,
};
use reqwest::Url;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const USER_AGENT: &str = "board-tests/0.1";

fn envelope(name: &str, kmh: Option<f64>) -> Value {
    let weather = match kmh {
        Some(kmh) => json!({"wind": {"speed": {"kmh": kmh}}, "temp": {"celsius": 11}}),
        None => json!({"temp": {"celsius": 11}}),
    };

    json!({"result": {"response": {"airport": {"pluginData": {
        "details": {"name": name},
        "schedule": {
            "arrivals": {"data": [{"flight": {
                "identification": {"number": {"default": "BA178"}},
                "status": {"text": "Estimated 14:05"},
                "time": {"scheduled": {"departure": 1_700_000_000, "arrival": 1_700_025_200}}
            }}]},
            "departures": {"data": []}
        },
        "weather": weather
    }}}}})
}

async fn mount_airport(server: &MockServer, code: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/common/v1/airport.json"))
        .and(query_param("code", code))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn runner(server: &MockServer) -> Runner<FlightradarClient> {
    let config = Config {
        base_url: format!("{}/common/v1/airport.json", server.uri()),
        user_agent: USER_AGENT.to_string(),
        ..Config::default()
    };
    Runner::from_config(FlightradarClient::from_config(&config), &config).unwrap()
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

fn order(airports: &[Airport]) -> Vec<&str> {
    airports.iter().map(|a| a.icao_code.as_str()).collect()
}

#[tokio::test]
async fn calmer_airport_is_listed_first() {
    let server = MockServer::start().await;
    let jfk = envelope("John F. Kennedy International Airport", Some(10.0));
    let lhr = envelope("London Heathrow Airport", Some(5.0));
    mount_airport(&server, "KJFK", jfk).await;
    mount_airport(&server, "EGLL", lhr).await;

    let airports = runner(&server).collect(&codes(&["KJFK", "EGLL"])).await;

    assert_eq!(order(&airports), ["EGLL", "KJFK"]);
    assert_eq!(airports[0].name, "London Heathrow Airport");
    assert_eq!(airports[1].arrivals[0].number.as_deref(), Some("BA178"));
}

#[tokio::test]
async fn failed_airport_does_not_spoil_the_others() {
    let server = MockServer::start().await;
    let lhr = envelope("London Heathrow Airport", Some(20.0));
    mount_airport(&server, "EGLL", lhr).await;
    Mock::given(method("GET"))
        .and(query_param("code", "XXXX"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("code", "YYYY"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let airports = runner(&server).collect(&codes(&["XXXX", "EGLL", "YYYY"])).await;

    assert_eq!(order(&airports), ["XXXX", "YYYY", "EGLL"]);

    for failed in &airports[..2] {
        assert_eq!(failed.name, "");
        assert_eq!(failed.weather, json!({}));
        assert!(failed.arrivals.is_empty() && failed.departures.is_empty());
        assert!(failed.to_string().starts_with("Airport: \nICAO Code: "));
    }

    let ok = &airports[2];
    assert_eq!(ok.name, "London Heathrow Airport");
    assert_eq!(ok.arrivals.len(), 1);
    assert_eq!(ok.wind_speed_kmh(), 20.0);
}

#[tokio::test]
async fn missing_envelope_is_treated_as_empty() {
    let server = MockServer::start().await;
    mount_airport(&server, "LFPG", json!({"result": {"response": {}}})).await;

    let airports = runner(&server).collect(&codes(&["LFPG"])).await;

    assert_eq!(airports.len(), 1);
    assert_eq!(airports[0].name, "");
    assert_eq!(airports[0].raw_payload, json!({}));
}

#[tokio::test]
async fn equal_wind_keeps_input_order() {
    let server = MockServer::start().await;
    mount_airport(&server, "AAAA", envelope("A", None)).await;
    mount_airport(&server, "BBBB", envelope("B", Some(0.0))).await;
    mount_airport(&server, "CCCC", envelope("C", Some(3.0))).await;
    mount_airport(&server, "DDDD", envelope("D", None)).await;

    let airports = runner(&server)
        .collect(&codes(&["CCCC", "AAAA", "BBBB", "DDDD"]))
        .await;

    assert_eq!(order(&airports), ["AAAA", "BBBB", "DDDD", "CCCC"]);
}

#[tokio::test]
async fn every_code_yields_one_block() {
    let server = MockServer::start().await;
    let list = ["EDDF", "EHAM", "LEMD", "LIRF", "LOWW", "LSZH", "EKCH"];
    for code in list {
        mount_airport(&server, code, envelope(code, Some(1.0))).await;
    }

    let report = runner(&server).run(&codes(&list)).await;

    let Report::Airports(airports) = &report else {
        panic!("expected airports, got {report:?}");
    };
    assert_eq!(airports.len(), list.len());
    assert_eq!(report.to_string().matches("Airport: ").count(), list.len());
}

#[tokio::test]
async fn empty_input_sends_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = runner(&server).run(&[]).await;

    assert_eq!(report.to_string(), format!("{USAGE_HINT}\n"));
}

#[tokio::test]
async fn request_carries_cache_busting_timestamp() {
    let server = MockServer::start().await;
    mount_airport(&server, "KJFK", envelope("JFK", None)).await;

    runner(&server).collect(&codes(&["KJFK"])).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let timestamp = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "timestamp")
        .map(|(_, v)| v.into_owned())
        .expect("timestamp query parameter");
    assert!(timestamp.parse::<i64>().unwrap() > 0);
}

/// Sends one code to a port nobody listens on, everything else to the mock server.
#[derive(Debug)]
struct OneAirportDown {
    inner: FlightradarClient,
    down: &'static str,
    dead_port: u16,
}

#[async_trait]
impl FlightDataProvider for OneAirportDown {
    async fn get_airport(&self, url: &Url) -> Result<Value, FetchError> {
        let mut url = url.clone();
        if url.query_pairs().any(|(k, v)| k == "code" && v == self.down) {
            url.set_port(Some(self.dead_port)).unwrap();
        }
        self.inner.get_airport(&url).await
    }
}

fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn network_failure_is_isolated_to_its_airport() {
    let server = MockServer::start().await;
    let lhr = envelope("London Heathrow Airport", Some(8.0));
    mount_airport(&server, "EGLL", lhr).await;

    let provider = OneAirportDown {
        inner: FlightradarClient::new(USER_AGENT),
        down: "KJFK",
        dead_port: closed_port(),
    };
    let base = Url::parse(&format!("{}/common/v1/airport.json", server.uri())).unwrap();

    let mut unreachable = Airport::new("KJFK", &base, 0);
    let err = unreachable.fetch(&provider).await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got {err:?}");

    let runner = Runner::new(provider, base, 5);
    let airports = runner.collect(&codes(&["EGLL", "KJFK"])).await;

    assert_eq!(order(&airports), ["KJFK", "EGLL"]);
    assert_eq!(airports[0].name, "");
    assert!(airports[0].arrivals.is_empty());
    assert_eq!(airports[1].name, "London Heathrow Airport");
    assert_eq!(airports[1].arrivals.len(), 1);
}
