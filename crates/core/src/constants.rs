/// Page size used by list screens when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Products fetched at once for the routine form's product picker.
pub const PRODUCT_PICKER_LIMIT: u32 = 100;

/// Default base URL of the remote service.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
