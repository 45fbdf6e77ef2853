//! 方法目录（`rpc.discover`）
//!
//! 供调试与发现工具查询服务暴露了哪些方法，与业务逻辑无关。
use serde::Serialize;
use serde_json::Value;

use super::types::methods;

#[derive(Serialize, Debug, Clone, Copy)]
pub struct ParamDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
    pub required: bool,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamDescriptor],
    pub result: &'static str,
}

pub const SERVICE_NAME: &str = "account.AccountService";

pub const METHODS: &[MethodDescriptor] = &[
    MethodDescriptor {
        name: methods::POST_ACCOUNT,
        summary: "Create an account; the server assigns its id",
        params: &[ParamDescriptor {
            name: "name",
            ty: "string",
            required: true,
        }],
        result: "{ account: { id: string, name: string } }",
    },
    MethodDescriptor {
        name: methods::GET_ACCOUNT,
        summary: "Fetch one account by id; fails with not_found when absent",
        params: &[ParamDescriptor {
            name: "id",
            ty: "string",
            required: true,
        }],
        result: "{ account: { id: string, name: string } }",
    },
    MethodDescriptor {
        name: methods::GET_ACCOUNTS,
        summary: "List accounts by id descending; take is capped at 100, \
                  skip=0 take=0 means take=100",
        params: &[
            ParamDescriptor {
                name: "skip",
                ty: "uint64",
                required: false,
            },
            ParamDescriptor {
                name: "take",
                ty: "uint64",
                required: false,
            },
        ],
        result: "{ accounts: [{ id: string, name: string }] }",
    },
    MethodDescriptor {
        name: methods::DISCOVER,
        summary: "Describe the methods exposed by this service",
        params: &[],
        result: "{ service: string, version: string, methods: [...] }",
    },
];

pub fn catalog() -> Value {
    serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "methods": METHODS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_method() {
        let catalog = catalog();
        let names: Vec<&str> = catalog["methods"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["PostAccount", "GetAccount", "GetAccounts", "rpc.discover"]
        );
        assert_eq!(catalog["methods"][2]["params"][1]["type"], "uint64");
    }
}
