/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Providers to poll each cycle, in order. Any subset of ["dyn", "ns1"].
providers = []

# Seconds between collection cycles
check_interval = 300

# Address of the statsd/dogstatsd backend
statsd_address = "localhost:8125"

# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# DynECT credentials, required when "dyn" is enabled
#[dyn]
#customer = "your_customer"
#username = "your_username"
#password = "your_password"

# NS1 credentials, required when "ns1" is enabled
#[ns1]
#api_key = "your_api_key"
"#;
