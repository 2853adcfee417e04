//! Common/shared messages across commands

pub struct CommonMessages {
    pub error_generic: &'static str,
    pub logging_init_failed: &'static str,
    pub success: &'static str,
}

pub const COMMON_MESSAGES: CommonMessages = CommonMessages {
    error_generic: "❌ Error: {error}",
    logging_init_failed: "Failed to initialize logging, continuing without it",
    success: "✅ Success!",
};
