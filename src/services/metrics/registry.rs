use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounter, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "lampy";

/// Per-application metrics registry. Not the process-global default registry,
/// so several apps (e.g. test servers) can coexist.
pub struct MetricsRegistry {
    registry: Registry,

    // HTTP Metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Domain Metrics
    pub users_registered_total: IntCounter,
    pub sessions_booked_total: IntCounter,
    pub sessions_cancelled_total: IntCounter,
    pub verification_uploads_total: CounterVec,
    pub verification_decisions_total: CounterVec,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests").namespace(NAMESPACE),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration")
                .namespace(NAMESPACE)
                .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        let users_registered_total = IntCounter::with_opts(
            Opts::new("users_registered_total", "Users registered").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(users_registered_total.clone()))?;

        let sessions_booked_total = IntCounter::with_opts(
            Opts::new("sessions_booked_total", "Counselling sessions booked").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(sessions_booked_total.clone()))?;

        let sessions_cancelled_total = IntCounter::with_opts(
            Opts::new("sessions_cancelled_total", "Session cancellations").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(sessions_cancelled_total.clone()))?;

        let verification_uploads_total = CounterVec::new(
            Opts::new("verification_uploads_total", "Verification documents uploaded")
                .namespace(NAMESPACE),
            &["kind"],
        )?;
        registry.register(Box::new(verification_uploads_total.clone()))?;

        let verification_decisions_total = CounterVec::new(
            Opts::new("verification_decisions_total", "Verification requests resolved by admins")
                .namespace(NAMESPACE),
            &["kind", "decision"],
        )?;
        registry.register(Box::new(verification_decisions_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            users_registered_total,
            sessions_booked_total,
            sessions_cancelled_total,
            verification_uploads_total,
            verification_decisions_total,
        })
    }

    pub fn record_verification_upload(&self, kind: &str) {
        self.verification_uploads_total
            .with_label_values(&[kind])
            .inc();
    }

    pub fn record_verification_decision(&self, kind: &str, decision: &str) {
        self.verification_decisions_total
            .with_label_values(&[kind, decision])
            .inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
