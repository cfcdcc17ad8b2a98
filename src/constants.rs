pub mod appwrite {

    pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
}

pub mod trending {

    pub const DEFAULT_LIMIT: usize = 5;

    pub const MAX_LIMIT: usize = 100;

    pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

    pub const SEARCH_TERM_ATTRIBUTE: &str = "searchTerm";

    pub const COUNT_ATTRIBUTE: &str = "count";
}

pub mod env {

    pub const ENDPOINT: &str = "APPWRITE_ENDPOINT";

    pub const PROJECT_ID: &str = "APPWRITE_PROJECT_ID";

    pub const DATABASE_ID: &str = "APPWRITE_DATABASE_ID";

    pub const COLLECTION_ID: &str = "APPWRITE_COLLECTION_ID";

    pub const API_KEY: &str = "APPWRITE_API_KEY";
}
