/// Top-level destinations. Routes carry no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Chats,
    Contacts,
    Profile,
    Settings,
    Notifications,
    VoiceCall,
    VideoCall,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Self::Chats,
        Self::Contacts,
        Self::Profile,
        Self::Settings,
        Self::Notifications,
        Self::VoiceCall,
        Self::VideoCall,
    ];

    /// Entries of the navigation sidebar, top to bottom.
    pub const NAVIGATION: [Route; 5] = [
        Self::Chats,
        Self::Contacts,
        Self::Notifications,
        Self::Profile,
        Self::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Chats => "/",
            Self::Contacts => "/contacts",
            Self::Profile => "/profile",
            Self::Settings => "/settings",
            Self::Notifications => "/notifications",
            Self::VoiceCall => "/voice-call",
            Self::VideoCall => "/video-call",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Chats => "Chats",
            Self::Contacts => "Contacts",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::Notifications => "Notifications",
            Self::VoiceCall => "Voice Call",
            Self::VideoCall => "Video Call",
        }
    }

    /// Call routes take the whole window, without the sidebar.
    pub fn is_call(&self) -> bool {
        matches!(self, Self::VoiceCall | Self::VideoCall)
    }
}
