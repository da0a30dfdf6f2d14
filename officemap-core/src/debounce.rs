use crate::{
    gateways::geocode::GeoCodingGateway,
    location::{apply_edit, LocationEdit, LocationFields},
};
use std::time::{Duration, Instant};

/// Coalesces rapid edits of the address text.
///
/// Only the most recent text is kept. It becomes ready once no further
/// text has been pushed for the quiet period.
#[derive(Debug, Clone)]
pub struct AddressDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
}

impl AddressDebouncer {
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new text and supersedes any pending one.
    pub fn push(&mut self, address: String, now: Instant) {
        if let Some((superseded, _)) = self.pending.replace((address, now)) {
            log::trace!("Superseded pending address '{}'", superseded);
        }
    }

    /// Takes the pending text if it has settled.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let settled = self
            .pending
            .as_ref()
            .map(|(_, pushed_at)| now.saturating_duration_since(*pushed_at) >= self.quiet_period)
            .unwrap_or(false);
        if settled {
            self.take()
        } else {
            None
        }
    }

    /// Takes the pending text regardless of the quiet period.
    pub fn take(&mut self) -> Option<String> {
        self.pending.take().map(|(address, _)| address)
    }
}

/// A form session of the location field group with debounced lookups.
///
/// Address edits are deferred until the text has settled. Every other
/// edit first applies a still pending address so that the order of
/// edits is preserved.
pub struct FieldGroupSession<'g, G: ?Sized> {
    fields: LocationFields,
    debouncer: AddressDebouncer,
    geo_gw: &'g G,
}

impl<'g, G> FieldGroupSession<'g, G>
where
    G: GeoCodingGateway + ?Sized,
{
    pub fn new(fields: LocationFields, quiet_period: Duration, geo_gw: &'g G) -> Self {
        Self {
            fields,
            debouncer: AddressDebouncer::new(quiet_period),
            geo_gw,
        }
    }

    /// The current state, without any pending address.
    pub fn fields(&self) -> &LocationFields {
        &self.fields
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn edit(&mut self, edit: LocationEdit, now: Instant) {
        match edit {
            LocationEdit::Address(address) => {
                self.debouncer.push(address, now);
            }
            edit => {
                self.flush();
                self.apply(edit);
            }
        }
    }

    /// Applies a settled address. Returns `true` if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(address) => {
                self.apply(LocationEdit::Address(address));
                true
            }
            None => false,
        }
    }

    /// Applies a pending address immediately, e.g. when the form is submitted.
    pub fn flush(&mut self) {
        if let Some(address) = self.debouncer.take() {
            self.apply(LocationEdit::Address(address));
        }
    }

    pub fn finish(mut self) -> LocationFields {
        self.flush();
        self.fields
    }

    fn apply(&mut self, edit: LocationEdit) {
        let fields = std::mem::take(&mut self.fields);
        self.fields = apply_edit(fields, edit, self.geo_gw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MapPoint;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CountingGeoGW {
        requests: RefCell<Vec<String>>,
    }

    impl GeoCodingGateway for CountingGeoGW {
        fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
            self.requests.borrow_mut().push(address.to_string());
            let n = self.requests.borrow().len() as f64;
            Some(MapPoint::from_lat_lng_deg(n, n))
        }
    }

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn debouncer_yields_latest_text_once() {
        let t0 = Instant::now();
        let mut d = AddressDebouncer::new(QUIET);
        assert_eq!(None, d.poll(t0));
        d.push("J".into(), t0);
        d.push("Ja".into(), t0 + Duration::from_millis(100));
        d.push("Jakarta".into(), t0 + Duration::from_millis(200));
        assert_eq!(None, d.poll(t0 + Duration::from_millis(400)));
        assert!(d.is_pending());
        assert_eq!(
            Some("Jakarta".to_string()),
            d.poll(t0 + Duration::from_millis(500))
        );
        assert!(!d.is_pending());
        assert_eq!(None, d.poll(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn debouncer_take_ignores_quiet_period() {
        let t0 = Instant::now();
        let mut d = AddressDebouncer::new(QUIET);
        d.push("Bogor".into(), t0);
        assert_eq!(Some("Bogor".to_string()), d.take());
        assert_eq!(None, d.take());
    }

    #[test]
    fn superseded_addresses_are_never_resolved() {
        let gw = CountingGeoGW::default();
        let t0 = Instant::now();
        let mut session = FieldGroupSession::new(LocationFields::default(), QUIET, &gw);
        for (i, text) in ["S", "Su", "Sur", "Surabaya"].iter().enumerate() {
            session.edit(
                LocationEdit::Address(text.to_string()),
                t0 + Duration::from_millis(50 * i as u64),
            );
            assert!(!session.tick(t0 + Duration::from_millis(50 * i as u64 + 10)));
        }
        assert!(session.fields().address.is_empty());
        assert!(session.tick(t0 + Duration::from_secs(1)));
        assert_eq!(vec!["Surabaya"], *gw.requests.borrow());
        assert_eq!("Surabaya", session.fields().address);
        assert_eq!(Some(1.0), session.fields().latitude);
    }

    #[test]
    fn other_edits_keep_their_order() {
        let gw = CountingGeoGW::default();
        let t0 = Instant::now();
        let mut session = FieldGroupSession::new(LocationFields::default(), QUIET, &gw);
        session.edit(LocationEdit::Address("Medan".into()), t0);
        session.edit(
            LocationEdit::Marker(MapPoint::from_lat_lng_deg(10.0, 20.0)),
            t0 + Duration::from_millis(10),
        );
        assert!(!session.is_pending());
        let fields = session.finish();
        assert_eq!(vec!["Medan"], *gw.requests.borrow());
        assert_eq!("Medan", fields.address);
        assert_eq!(Some(10.0), fields.latitude);
        assert_eq!(Some(20.0), fields.longitude);
    }

    #[test]
    fn finish_flushes_pending_address() {
        let gw = CountingGeoGW::default();
        let mut session = FieldGroupSession::new(LocationFields::default(), QUIET, &gw);
        session.edit(LocationEdit::Address("Makassar".into()), Instant::now());
        let fields = session.finish();
        assert_eq!("Makassar", fields.address);
        assert_eq!(MapPoint::from_lat_lng_deg(1.0, 1.0), fields.location);
    }
}
