use std::path::PathBuf;

#[derive(Debug)]
pub(crate) struct Context {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,

    pub handlebars: handlebars::Handlebars<'static>,
}

impl Context {
    pub fn new(
        source_dir: PathBuf,
        dest_dir: PathBuf,
        handlebars: handlebars::Handlebars<'static>,
    ) -> Self {
        Self {
            source_dir,
            dest_dir,
            handlebars,
        }
    }
}
