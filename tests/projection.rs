use approx::assert_abs_diff_eq;
use clipperwatch::scene::project;

#[test]
fn projected_point_lies_at_the_sample_range() {
    for &lon in &[0.0, 17.5, 90.0, 133.3, 180.0, 271.4, 359.9] {
        for &range in &[0.0, 0.387, 1.0, 5.2, 30.1] {
            let p = project(lon, range);
            assert_abs_diff_eq!((p.x * p.x + p.y * p.y).sqrt(), range, epsilon = 1e-12);
        }
    }
}

#[test]
fn projection_follows_the_ecliptic_quadrants() {
    let east = project(0.0, 1.0);
    assert_abs_diff_eq!(east.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(east.y, 0.0, epsilon = 1e-12);

    let north = project(90.0, 1.0);
    assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(north.y, 1.0, epsilon = 1e-12);

    let west = project(180.0, 2.5);
    assert_abs_diff_eq!(west.x, -2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(west.y, 0.0, epsilon = 1e-11);

    let south = project(270.0, 0.7);
    assert_abs_diff_eq!(south.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(south.y, -0.7, epsilon = 1e-12);
}

#[test]
fn full_turn_wraps_to_the_prime_direction() {
    let wrapped = project(360.0, 1.3);
    let prime = project(0.0, 1.3);
    assert_abs_diff_eq!(wrapped.x, prime.x, epsilon = 1e-12);
    assert_abs_diff_eq!(wrapped.y, prime.y, epsilon = 1e-12);
}
