/// Remote participant tile of a video call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub avatar: String,
    pub is_muted: bool,
    pub is_video_off: bool,
    pub is_host: bool,
}

impl Participant {
    pub fn display_name(&self) -> String {
        if self.is_host {
            format!("{} (Host)", self.name)
        } else {
            self.name.clone()
        }
    }
}
