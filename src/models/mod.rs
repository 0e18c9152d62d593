//! Request and response types exchanged with the Mailosaur API.

mod analysis;
mod devices;
mod messages;
mod servers;
mod usage;

pub use analysis::{
    BlockListResult, Content, DeliverabilityReport, DnsRecords, EmailAuthenticationResult,
    SpamAnalysisResult, SpamAssassinResult, SpamAssassinRule, SpamFilterResults,
};
pub use devices::{Device, DeviceCreateOptions, DeviceListResult, OtpResult};
pub use messages::{
    Attachment, EmailClient, EmailClientListResult, Image, Link, Message, MessageAddress,
    MessageContent, MessageCreateOptions, MessageForwardOptions, MessageHeader, MessageListResult,
    MessageReplyOptions, MessageSummary, Metadata, Preview, PreviewListResult, PreviewRequest,
    PreviewRequestOptions, SearchCriteria, SearchMatch,
};
pub use servers::{Server, ServerCreateOptions, ServerListResult};
pub use usage::{UsageAccountLimit, UsageAccountLimits, UsageTransaction, UsageTransactionListResult};
