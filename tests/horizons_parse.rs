use clipperwatch::horizons::HorizonsError;
use clipperwatch::horizons::parse::{
    parse_elements_response, parse_envelope, parse_observer_response,
};

const OBSERVER_RESULT: &str = r#"*******************************************************************************
 Revised: Oct 21, 2024           Europa Clipper / (Sun)                    -159
*******************************************************************************
Target body name: Europa Clipper (spacecraft) (-159)  {source: europa_clipper_merged}
Center body name: Sun (10)                        {source: DE441}
Center-site name: BODY CENTER
*******************************************************************************
 Date__(UT)__HR:MN, , , hEcl-Lon, hEcl-Lat,               r,       rdot,            delta,     deldot,
***************************************************************************************************
$$SOE
 2026-Aug-06 00:00, , , 120.4567,   1.2345,  3.214598765432, 12.345678,   2.987654321098, -14.253647,
 2026-Aug-13 00:00, , , 121.0001,   1.3000,  3.251234567890, 12.100000,   3.012345678901, -13.900000,
$$EOE
*******************************************************************************
"#;

const ELEMENTS_RESULT: &str = r#"*******************************************************************************
Target body name: Jupiter (599)                   {source: DE441}
Center body name: Sun (10)                        {source: DE441}
*******************************************************************************
JDTDB, Calendar Date (TDB), EC, QR, IN, OM, W, Tp, N, MA, TA, A, AD, PR,
**************************************************************************************
$$SOE
2461258.500000000, A.D. 2026-Aug-06 00:00:00.0000, 4.877E-02, 4.950E+00, 1.303E+00, 1.005E+02, 2.738E+02, 2459970.5, 8.309E-02, 1.070E+02, 1.121E+02, 5.204E+00, 5.458E+00, 4.332E+03,
$$EOE
*******************************************************************************
"#;

#[test]
fn envelope_unwraps_the_result_payload() {
    let body = serde_json::json!({
        "result": OBSERVER_RESULT,
        "signature": { "source": "NASA/JPL Horizons API", "version": "1.2" },
    })
    .to_string();

    let result = parse_envelope(&body).expect("envelope");
    assert!(result.contains("$$SOE"));
}

#[test]
fn envelope_errors_are_surfaced() {
    let body = serde_json::json!({ "error": "unknown object" }).to_string();
    assert!(matches!(parse_envelope(&body), Err(HorizonsError::Api(_))));
}

#[test]
fn garbage_envelopes_are_malformed() {
    assert!(matches!(
        parse_envelope("<html>503</html>"),
        Err(HorizonsError::Malformed(_))
    ));
}

#[test]
fn observer_response_parses_name_and_samples() {
    let observation = parse_observer_response(OBSERVER_RESULT).expect("observation");

    assert_eq!(observation.display_name, "Europa Clipper");
    assert_eq!(observation.samples.len(), 2);

    let first = &observation.samples[0];
    assert_eq!(first.epoch, "2026-Aug-06 00:00");
    assert_eq!(first.ecliptic_longitude_deg, 120.4567);
    assert_eq!(first.ecliptic_latitude_deg, 1.2345);
    assert_eq!(first.heliocentric_range_au, 3.214598765432);
    assert_eq!(first.observer_range_au, 2.987654321098);
    assert_eq!(first.observer_range_rate_km_s, -14.253647);

    // Rows stay in the ascending epoch order Horizons emits.
    assert_eq!(observation.samples[1].epoch, "2026-Aug-13 00:00");
}

#[test]
fn elements_response_parses_the_osculating_set() {
    let elements = parse_elements_response(ELEMENTS_RESULT).expect("elements");
    assert_eq!(elements.eccentricity, 4.877E-02);
    assert_eq!(elements.semi_major_axis_au, 5.204);
    assert_eq!(elements.argument_of_periapsis_deg, 273.8);
    assert_eq!(elements.ascending_node_longitude_deg, 100.5);
}

#[test]
fn responses_without_a_table_are_rejected() {
    let result = "Target body name: Jupiter (599)\nNo ephemeris for target";
    assert!(matches!(
        parse_observer_response(result),
        Err(HorizonsError::MissingTable)
    ));
}

#[test]
fn missing_columns_are_named() {
    let result = "Target body name: Jupiter (599)\n\
                  Date__(UT)__HR:MN, , , hEcl-Lon, hEcl-Lat, r, rdot,\n\
                  $$SOE\n\
                  2026-Aug-06 00:00, , , 120.0, 1.0, 3.0, 1.0,\n\
                  $$EOE";
    assert!(matches!(
        parse_observer_response(result),
        Err(HorizonsError::MissingColumn("delta"))
    ));
}

#[test]
fn non_numeric_cells_are_rejected() {
    let result = "Target body name: Jupiter (599)\n\
                  Date__(UT)__HR:MN, , , hEcl-Lon, hEcl-Lat, r, rdot, delta, deldot,\n\
                  $$SOE\n\
                  2026-Aug-06 00:00, , , n.a., 1.0, 3.0, 1.0, 2.0, -1.0,\n\
                  $$EOE";
    assert!(matches!(
        parse_observer_response(result),
        Err(HorizonsError::BadNumber { column: "hEcl-Lon", .. })
    ));
}
