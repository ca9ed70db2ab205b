use tm_common::{great_circle_distance_miles, ErrorList};
use tm_datacheck::Datacheck;
use tm_model::{HighwayData, HighwaySegment, Route, RouteIdx, Waypoint};

/// One line's worth of alternate labels plus the coordinate parsed from its
/// trailing URL.
struct RawWaypoint {
    labels: Vec<String>,
    lat: f64,
    lng: f64,
}

/// Parse `?lat=<f>&lon=<f>` (query style) or `@<lat>,<lng>` (path style)
/// out of a waypoint URL. Returns `None` if neither pattern matches.
fn parse_latlng(url: &str) -> Option<(f64, f64)> {
    if let Some(at) = url.rfind('@') {
        let rest = &url[at + 1..];
        let coords = rest.split(['/', '?', '#']).next().unwrap_or(rest);
        let mut parts = coords.split(',');
        let lat: f64 = parts.next()?.parse().ok()?;
        let lng: f64 = parts.next()?.parse().ok()?;
        return Some((lat, lng));
    }
    if let Some(q) = url.find('?') {
        let query = &url[q + 1..];
        let mut lat = None;
        let mut lng = None;
        for pair in query.split('&') {
            let mut kv = pair.splitn(2, '=');
            let (Some(k), Some(v)) = (kv.next(), kv.next()) else { continue };
            match k {
                "lat" => lat = v.parse::<f64>().ok(),
                "lon" => lng = v.parse::<f64>().ok(),
                _ => {}
            }
        }
        if let (Some(lat), Some(lng)) = (lat, lng) {
            return Some((lat, lng));
        }
    }
    None
}

fn parse_line(line: &str) -> Option<RawWaypoint> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let url = tokens.pop()?;
    let (lat, lng) = parse_latlng(url)?;
    if tokens.is_empty() {
        return None;
    }
    Some(RawWaypoint { labels: tokens.iter().map(|s| s.to_string()).collect(), lat, lng })
}

/// Parse one `.wpt` file's text directly into `route`'s waypoint and
/// segment lists. Takes the route itself rather than the whole model so a
/// caller holding disjoint `&mut Route` borrows (e.g. `Vec::par_iter_mut`
/// over `HighwayData::routes`) can run this per-route worker concurrently.
/// A line that doesn't parse (bad URL, no labels) logs one `MALFORMED_URL`
/// datacheck entry and is skipped; the rest of the route continues, per the
/// local-failure policy.
pub fn load_wpt_into_route(text: &str, route_idx: RouteIdx, route: &mut Route, datacheck: &Datacheck) {
    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(raw) = parse_line(line) else {
            datacheck.add(tm_datacheck::DatacheckEntry::new(
                route_idx,
                route.root.clone(),
                format!("line {}", lineno + 1),
                String::new(),
                String::new(),
                "MALFORMED_URL".to_string(),
                line.to_string(),
            ));
            continue;
        };

        let primary = raw.labels[0].clone();
        let hidden = primary.starts_with('+');
        let no_photos = primary.ends_with('*');
        let index = route.waypoints.len() as u32;
        for label in &raw.labels {
            route.label_index.entry(label.clone()).or_insert(index as usize);
        }
        route.waypoints.push(Waypoint {
            label: primary,
            lat: raw.lat,
            lng: raw.lng,
            route: route_idx,
            index_in_route: index,
            colocated: None,
            hidden,
            no_photos,
        });
    }

    for i in 0..route.waypoints.len().saturating_sub(1) {
        let a = &route.waypoints[i];
        let b = &route.waypoints[i + 1];
        let miles = great_circle_distance_miles(a.lat, a.lng, b.lat, b.lng);
        route.segments.push(HighwaySegment::new(i as u32, i as u32 + 1, miles));
    }
}

/// Single-route convenience wrapper over [`load_wpt_into_route`] for
/// callers (tests, serial tools) that already hold `&mut HighwayData`.
pub fn load_wpt(text: &str, route_idx: RouteIdx, data: &mut HighwayData, datacheck: &Datacheck, _el: &ErrorList) {
    load_wpt_into_route(text, route_idx, data.route_mut(route_idx), datacheck);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{ContinentIdx, CountryIdx, HighwaySystem, Region, Route, Tier};

    fn setup() -> (HighwayData, RouteIdx) {
        let mut data = HighwayData::new();
        let region = data.push_region(Region {
            code: "ca".into(),
            name: "California".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            is_multi_region: false,
        });
        let sys = data.push_system(HighwaySystem {
            name: "usai".into(),
            full_name: "US Interstates".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
        let route = Route::new(sys, region, "I-90".into(), String::new(), String::new(), String::new());
        let idx = data.push_route(route);
        data.system_mut(sys).routes.push(idx);
        (data, idx)
    }

    #[test]
    fn parses_query_style_and_path_style_urls() {
        let (mut data, idx) = setup();
        let datacheck = Datacheck::new();
        let el = ErrorList::new();
        let text = "A http://example.com/?lat=34.05&lon=-118.25\nB https://example.com/@34.10,-118.30,17z\n";
        load_wpt(text, idx, &mut data, &datacheck, &el);

        let route = data.route(idx);
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.waypoints[0].lat, 34.05);
        assert_eq!(route.waypoints[1].lat, 34.10);
        assert_eq!(route.segments.len(), 1);
        assert!(datacheck.is_empty());
    }

    #[test]
    fn malformed_line_logs_datacheck_and_is_skipped() {
        let (mut data, idx) = setup();
        let datacheck = Datacheck::new();
        let el = ErrorList::new();
        let text = "A http://example.com/?lat=34.05&lon=-118.25\nnotaurl\nB http://example.com/?lat=34.10&lon=-118.30\n";
        load_wpt(text, idx, &mut data, &datacheck, &el);

        assert_eq!(data.route(idx).waypoints.len(), 2);
        assert_eq!(datacheck.len(), 1);
    }

    #[test]
    fn hidden_marker_sets_hidden_flag() {
        let (mut data, idx) = setup();
        let datacheck = Datacheck::new();
        let el = ErrorList::new();
        let text = "+X http://example.com/?lat=34.05&lon=-118.25\n";
        load_wpt(text, idx, &mut data, &datacheck, &el);
        assert!(data.route(idx).waypoints[0].hidden);
    }
}
