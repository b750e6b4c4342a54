// 위/경도 계산 유틸
// Great-circle distance helpers shared by the SQL query and the in-memory store

/// 지구 반지름 (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 주변 흡연구역 조회 반경 (km)
pub const NEARBY_RADIUS_KM: f64 = 2.0;

/// 두 좌표 사이 거리 (km), 구면 코사인 법칙
/// Spherical law of cosines, same formula as the Postgres query.
///
/// acos 입력은 부동소수 오차로 [-1, 1] 을 벗어날 수 있어 clamp 합니다.
pub fn distance_km(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let (lat1, long1, lat2, long2) = (
        lat1.to_radians(),
        long1.to_radians(),
        lat2.to_radians(),
        long2.to_radians(),
    );

    let cos_angle = lat1.cos() * lat2.cos() * (long2 - long1).cos() + lat1.sin() * lat2.sin();

    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

pub fn is_valid_longitude(long: f64) -> bool {
    long.is_finite() && (-180.0..=180.0).contains(&long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let d = distance_km(37.5665, 126.9780, 37.5665, 126.9780);
        assert!(d.abs() < 1e-6, "distance was {}", d);
    }

    #[test]
    fn test_seoul_city_hall_to_gangnam_station() {
        // 서울시청 -> 강남역, 약 8.8km
        let d = distance_km(37.5665, 126.9780, 37.4979, 127.0276);
        assert!((8.5..9.2).contains(&d), "distance was {}", d);
    }

    #[test]
    fn test_one_hundredth_degree_latitude_is_about_1_1km() {
        let d = distance_km(0.0, 0.0, 0.01, 0.0);
        assert!((1.10..1.12).contains(&d), "distance was {}", d);
        assert!(d < NEARBY_RADIUS_KM);
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(is_valid_latitude(90.0));
        assert!(!is_valid_latitude(90.1));
        assert!(!is_valid_latitude(f64::NAN));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(180.5));
    }
}
