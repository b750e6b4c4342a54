/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 위/경도 거리 계산 (흡연구역 반경 조회)
pub mod geo;

pub use geo::*;
