pub mod search_record;

pub use search_record::{Movie, NewSearchRecord, SearchRecord, SearchRecordPatch, build_poster_url};
