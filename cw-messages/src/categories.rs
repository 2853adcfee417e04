pub struct OperationMessages {
    pub starting: &'static str,
    pub success: &'static str,
    pub failed: &'static str,
}

pub struct RuntimeOperations {
    pub install: OperationMessages,
    pub start: OperationMessages,
    pub stop: OperationMessages,
    pub remove: OperationMessages,
}

pub const RUNTIME_OPS: RuntimeOperations = RuntimeOperations {
    install: OperationMessages {
        starting: "📦 Installing runtime {tag}...",
        success: "✅ Runtime installed",
        failed: "❌ Failed to install runtime {tag}",
    },
    start: OperationMessages {
        starting: "🚀 Starting runtime {tag}...",
        success: "✅ Runtime started",
        failed: "❌ Failed to start runtime {tag}",
    },
    stop: OperationMessages {
        starting: "🛑 Stopping runtime...",
        success: "✅ Runtime stopped",
        failed: "❌ Failed to stop runtime",
    },
    remove: OperationMessages {
        starting: "🗑️ Removing runtime {tag}...",
        success: "✅ Runtime removed",
        failed: "❌ Failed to remove runtime {tag}",
    },
};
