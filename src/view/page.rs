/// Anchors a shell reports as present on the loaded page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageAnchors {
    pub terms_box: bool,
    pub login_box: bool,
}

/// Logical page currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Terms,
    LoginRegister,
    Splash,
}

impl Page {
    pub fn detect(anchors: &PageAnchors) -> Self {
        if anchors.terms_box {
            Page::Terms
        } else if anchors.login_box {
            Page::LoginRegister
        } else {
            Page::Splash
        }
    }
}

/// Navigation targets of the entry flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Terms,
    Login,
    Main,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Terms => "index.html",
            Destination::Login => "login.html",
            Destination::Main => "main.html",
        }
    }
}
