/// An uploaded résumé, borrowed from the caller for the duration of one
/// scoring call.
#[derive(Debug, Clone, Copy)]
pub struct ResumeDocument<'a> {
    pub bytes: &'a [u8],
    pub filename: &'a str,
    /// MIME type declared by the uploader, consulted when the filename has no
    /// recognised extension.
    pub content_type: Option<&'a str>,
}

impl<'a> ResumeDocument<'a> {
    pub fn new(bytes: &'a [u8], filename: &'a str) -> Self {
        Self {
            bytes,
            filename,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}
