// src/config/consts.rs

// Net config
pub const LOGIN_URL: &str = "https://www.clippercard.com/ClipperCard/loginFrame.jsf";
pub const ACCOUNT_URL: &str = "https://www.clippercard.com/ClipperCard/dashboard.jsf";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Login form
pub const LOGIN_FORM_ID: &str = "j_idt13";
pub const LOGIN_USERNAME_FIELD: &str = "j_idt13:username";
pub const LOGIN_PASSWORD_FIELD: &str = "j_idt13:password";
pub const LOGIN_SUBMIT_FIELD: &str = "j_idt13:submitLogin";
pub const LOGIN_SUBMIT_VALUE: &str = "Login";
pub const TOKEN_FIELD: &str = "javax.faces.ViewState";
pub const INVALID_LOGIN_MARKER: &str = "Your email or password is incorrect";

// Profile
pub const PROFILE_CLASS: &str = "profileData";
pub const PROFILE_FIELD_CLASS: &str = "fieldData";
pub const EMAIL_UPDATES_LABEL: &str = "Email Updates";
pub const OPT_IN_VALUES: [&str; 2] = ["Yes", "No"];
pub const EDIT_PROFILE_LINK: &str = "Edit My Profile Information";
pub const ALT_PHONE_LABEL: &str = "Alternate Phone:";
pub const PRIMARY_PAYMENT_LABEL: &str = "Primary Payment:";
pub const BACKUP_PAYMENT_LABEL: &str = "Backup Payment:";

// Cards
pub const CARDS_BEGIN: &str = "<!--YOUR CLIPPER CARDS-->";
pub const CARDS_END: &str = "<!--END YOUR CLIPPER CARDS-->";
pub const CARD_BLOCK_CLASS: &str = "whiteGreyCardBox";
pub const NESTED_VALUE_CLASS: &str = "displayName";
pub const SERIAL_LABEL: &str = "Serial Number:";
pub const NICKNAME_LABEL: &str = "Card Nickname:";
pub const TYPE_LABEL: &str = "Type:";
pub const STATUS_LABEL: &str = "Status:";
/// A product value is a currency amount or a pass validity line.
pub const PRODUCT_VALUE_PATTERN: &str = r"^(?:\$|Valid till\b)";
pub const RELOAD_CLASS_HINT: &str = "reload";
pub const RELOAD_FEATURE_NAME: &str = "Reload";

// Legacy account pages
pub const LEGACY_AUTOLOAD_NONE: &str = "-";

// Local config
pub const CONFIG_DIR: &str = "clippercard";
pub const CONFIG_FILE: &str = "clippercard.cfg";
pub const DEFAULT_ACCOUNT: &str = "default";
pub const ENV_PREFIX: &str = "CLIPPER";
