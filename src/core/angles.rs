pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Unit vector pointing `angle_deg` counter-clockwise from +x.
pub fn unit_at(angle_deg: f64) -> (f64, f64) {
    let theta = deg_to_rad(angle_deg);
    (theta.cos(), theta.sin())
}
