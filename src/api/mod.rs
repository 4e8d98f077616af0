pub mod events;
pub mod images;
pub mod upload;

pub use events::{handle_events, handle_ws, __path_handle_events, __path_handle_ws};
pub use images::{
    handle_all, handle_clear, handle_current, handle_delete, handle_select, FilenameRequest,
    FilenameResponse, FilesResponse,
};
pub use images::{
    __path_handle_all, __path_handle_clear, __path_handle_current, __path_handle_delete,
    __path_handle_select,
};
pub use upload::{handle_upload, UploadForm, UploadResponse, __path_handle_upload};
