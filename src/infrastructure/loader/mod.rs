mod google_doc;

pub use google_doc::GoogleDocLoader;
