use crate::classifier::SeverityTier;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// Reference description of a vulnerability class, shown when a user picks
/// one of the named vulnerabilities on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityCatalogEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub severity: SeverityTier,
    pub description: &'static str,
    pub impact: &'static str,
    pub remediation: &'static str,
    pub example: &'static str,
}

lazy_static! {
    static ref CATALOG: Vec<VulnerabilityCatalogEntry> = vec![
        VulnerabilityCatalogEntry {
            key: "Reentrancy",
            name: "Reentrancy Attack",
            severity: SeverityTier::Critical,
            description: "A reentrancy attack occurs when a function makes an external call to another untrusted contract before resolving its own state. The attacker can recursively call back into the original function, potentially draining funds or manipulating state.",
            impact: "Can lead to complete loss of funds, unauthorized state changes, and contract compromise. The DAO hack in 2016 resulted in a loss of $60 million due to a reentrancy vulnerability.",
            remediation: "Use the Checks-Effects-Interactions pattern: perform all checks first, update state variables, then make external calls. Alternatively, use ReentrancyGuard from OpenZeppelin or implement mutex locks.",
            example: r#"// Vulnerable Code
function withdraw(uint amount) public {
    require(balances[msg.sender] >= amount);
    msg.sender.call{value: amount}("");
    balances[msg.sender] -= amount; // State updated AFTER external call
}

// Fixed Code
function withdraw(uint amount) public {
    require(balances[msg.sender] >= amount);
    balances[msg.sender] -= amount; // State updated BEFORE external call
    msg.sender.call{value: amount}("");
}"#,
        },
        VulnerabilityCatalogEntry {
            key: "Integer Overflow",
            name: "Integer Overflow/Underflow",
            severity: SeverityTier::High,
            description: "Integer overflow occurs when an arithmetic operation exceeds the maximum value a variable can hold, wrapping around to zero. Underflow is the opposite, wrapping to the maximum value.",
            impact: "Can lead to incorrect calculations, unauthorized token minting, bypassing of balance checks, and financial losses.",
            remediation: "Use Solidity 0.8.0+ which has built-in overflow/underflow checks, or use SafeMath library for older versions. Always validate arithmetic operations.",
            example: r#"// Vulnerable Code (Solidity < 0.8.0)
uint256 balance = 100;
balance = balance - 200; // Underflows to max uint256

// Fixed Code (Solidity >= 0.8.0)
uint256 balance = 100;
balance = balance - 200; // Reverts automatically

// Or use SafeMath
using SafeMath for uint256;
balance = balance.sub(200); // Reverts on underflow"#,
        },
        VulnerabilityCatalogEntry {
            key: "Unchecked Call",
            name: "Unchecked External Call",
            severity: SeverityTier::Medium,
            description: "When a contract makes an external call without checking the return value, it may continue execution even if the call failed, leading to unexpected behavior.",
            impact: "Failed transfers may go unnoticed, leading to loss of funds or incorrect state assumptions.",
            remediation: "Always check return values of external calls. Use require() to ensure calls succeed, or handle failures explicitly.",
            example: r#"// Vulnerable Code
address.call{value: amount}(""); // Return value ignored

// Fixed Code
(bool success, ) = address.call{value: amount}("");
require(success, "Transfer failed");"#,
        },
        VulnerabilityCatalogEntry {
            key: "Access Control",
            name: "Access Control Vulnerability",
            severity: SeverityTier::High,
            description: "Improper access control allows unauthorized users to execute privileged functions, potentially compromising the entire contract.",
            impact: "Attackers can gain admin privileges, modify critical parameters, drain funds, or destroy the contract.",
            remediation: "Implement proper access control using modifiers, OpenZeppelin's Ownable or AccessControl contracts. Always validate msg.sender.",
            example: r#"// Vulnerable Code
function setOwner(address newOwner) public {
    owner = newOwner; // Anyone can call this!
}

// Fixed Code
modifier onlyOwner() {
    require(msg.sender == owner, "Not authorized");
    _;
}

function setOwner(address newOwner) public onlyOwner {
    owner = newOwner;
}"#,
        },
        VulnerabilityCatalogEntry {
            key: "Timestamp Dependence",
            name: "Timestamp Dependence",
            severity: SeverityTier::Low,
            description: "Relying on block.timestamp for critical logic can be manipulated by miners within a ~15 second window, potentially affecting time-sensitive operations.",
            impact: "Can affect lottery outcomes, auction endings, or time-locked operations if exploited by miners.",
            remediation: "Avoid using block.timestamp for critical randomness or precise timing. Use block.number for relative time, or oracle services for secure randomness.",
            example: r#"// Vulnerable Code
if (block.timestamp % 2 == 0) {
    winner = player1; // Miner can manipulate
}

// Better Approach
if (block.number % 2 == 0) {
    winner = player1; // Harder to manipulate
}

// Best Approach
// Use Chainlink VRF for randomness"#,
        },
    ];

    static ref BY_KEY: HashMap<String, usize> = CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.key.to_lowercase(), index))
        .collect();
}

/// Catalog entries in display order.
pub fn entries() -> &'static [VulnerabilityCatalogEntry] {
    &CATALOG
}

/// Look up an entry by its key, ignoring case.
pub fn lookup(key: &str) -> Option<&'static VulnerabilityCatalogEntry> {
    BY_KEY
        .get(&key.trim().to_lowercase())
        .and_then(|&index| CATALOG.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_entries_in_order() {
        let keys: Vec<&str> = entries().iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![
                "Reentrancy",
                "Integer Overflow",
                "Unchecked Call",
                "Access Control",
                "Timestamp Dependence"
            ]
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let entry = lookup("reentrancy").unwrap();
        assert_eq!(entry.name, "Reentrancy Attack");
        assert_eq!(entry.severity, SeverityTier::Critical);
        assert!(entry.example.contains("Checks") || entry.example.contains("withdraw"));

        assert_eq!(lookup(" Access Control ").unwrap().severity, SeverityTier::High);
        assert!(lookup("Flash Loan").is_none());
    }
}
