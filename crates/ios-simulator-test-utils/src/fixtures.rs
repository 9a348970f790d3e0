//! Canned simctl output and image bytes

/// Listing with one shutdown and one booted device
pub const LISTING_ONE_BOOTED: &str = "\
== Devices ==
-- iOS 17.2 --
    iPhone SE (3rd generation) (6B3D4F0A-0E0C-4B55-9C5B-1B0C8E3E3A11) (Shutdown)
    iPhone 15 (ABCD-1234-EF) (Booted)
-- watchOS 10.2 --
    Apple Watch Series 9 (45mm) (9C1D2E3F-4A5B-6C7D-8E9F-0A1B2C3D4E5F) (Shutdown)
";

/// Listing where nothing is booted
pub const LISTING_NONE_BOOTED: &str = "\
== Devices ==
-- iOS 17.2 --
    iPhone 15 (ABCD-1234-EF) (Shutdown)
    iPhone 15 Pro (0F8E2C7D-5A1B-4C3D-8E9F-A0B1C2D3E4F5) (Shutdown)
";

/// Id of the booted device in [`LISTING_ONE_BOOTED`]
pub const BOOTED_DEVICE_ID: &str = "ABCD-1234-EF";

/// PNG signature followed by the start of an IHDR chunk
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
];

/// stderr simctl prints for an unknown device
pub const INVALID_DEVICE_STDERR: &str = "Invalid device: does-not-exist";
