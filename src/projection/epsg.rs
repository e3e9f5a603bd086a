//! EPSG codes used by simgeo

/// WGS 84 geographic coordinates
pub const WGS84: u32 = 4326;

/// OSGB 1936 / British National Grid
pub const BRITISH_NATIONAL_GRID: u32 = 27700;

/// Formats a code as the `EPSG:<code>` authority string PROJ expects
pub fn authority_string(code: u32) -> String {
    format!("EPSG:{}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_string() {
        assert_eq!(authority_string(BRITISH_NATIONAL_GRID), "EPSG:27700");
        assert_eq!(authority_string(WGS84), "EPSG:4326");
    }
}
