use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub tracking_lookups_total: IntCounterVec,
    pub tracking_lookup_latency_seconds: HistogramVec,
    pub tracking_searches_in_flight: IntGauge,
    pub tracking_updates_total: IntCounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let tracking_lookups_total = IntCounterVec::new(
            Opts::new("tracking_lookups_total", "Tracking lookups by outcome"),
            &["outcome"],
        )
        .expect("valid tracking_lookups_total metric");

        let tracking_lookup_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "tracking_lookup_latency_seconds",
                "Latency of tracking number resolution in seconds",
            ),
            &["outcome"],
        )
        .expect("valid tracking_lookup_latency_seconds metric");

        let tracking_searches_in_flight = IntGauge::new(
            "tracking_searches_in_flight",
            "Tracking searches currently running",
        )
        .expect("valid tracking_searches_in_flight metric");

        let tracking_updates_total = IntCounterVec::new(
            Opts::new("tracking_updates_total", "Status updates published by entity type"),
            &["entity"],
        )
        .expect("valid tracking_updates_total metric");

        registry
            .register(Box::new(tracking_lookups_total.clone()))
            .expect("register tracking_lookups_total");
        registry
            .register(Box::new(tracking_lookup_latency_seconds.clone()))
            .expect("register tracking_lookup_latency_seconds");
        registry
            .register(Box::new(tracking_searches_in_flight.clone()))
            .expect("register tracking_searches_in_flight");
        registry
            .register(Box::new(tracking_updates_total.clone()))
            .expect("register tracking_updates_total");

        Self {
            registry,
            tracking_lookups_total,
            tracking_lookup_latency_seconds,
            tracking_searches_in_flight,
            tracking_updates_total,
        }
    }

    pub fn search_started(&self) -> InFlightSearch {
        self.tracking_searches_in_flight.inc();
        InFlightSearch {
            gauge: self.tracking_searches_in_flight.clone(),
        }
    }

    pub fn observe_lookup(&self, outcome: &str, elapsed_seconds: f64) {
        self.tracking_lookups_total
            .with_label_values(&[outcome])
            .inc();
        self.tracking_lookup_latency_seconds
            .with_label_values(&[outcome])
            .observe(elapsed_seconds);
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

// Decrements the in-flight gauge when dropped, including on cancellation.
pub struct InFlightSearch {
    gauge: IntGauge,
}

impl Drop for InFlightSearch {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
