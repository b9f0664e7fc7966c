// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompts and response schemas for the three advisor operations.

use serde_json::{json, Value};

pub fn evaluate_prompt(text: &str) -> String {
    format!(
        "Analyze the following password for security strength, complexity, and semantic patterns.\n\
         Password to analyze: \"{text}\"\n\n\
         Perform a deep cyber-security risk assessment.\n\
         1. Estimate the time to crack using brute force (assume a standard GPU rig).\n\
         2. Identify semantic weaknesses (dictionary words, common substitutions, keyboard patterns, dates).\n\
         3. Identify strengths (entropy, character mixing).\n\
         4. Estimate a breach probability based on how common the pattern is.\n\
         5. List the attack vectors most effective against this password \
         (e.g. \"Dictionary Attack\", \"Rainbow Table\", \"Social Engineering\", \
         \"Keyboard Walk\", \"Brute Force\", \"Mask Attack\").\n\n\
         Return the result strictly as JSON."
    )
}

pub fn evaluate_schema() -> Value {
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Security score from 0 to 100" },
            "crackTime": { "type": "STRING", "description": "Estimated time to crack" },
            "weaknesses": strings.clone(),
            "strengths": strings.clone(),
            "aiInsight": { "type": "STRING", "description": "Expert comment on the password pattern" },
            "breachProbability": { "type": "STRING", "description": "Low, Medium, High, or Critical" },
            "similarPatterns": strings.clone(),
            "attackVectors": strings.clone()
        },
        "required": [
            "score", "crackTime", "weaknesses", "strengths",
            "aiInsight", "breachProbability", "attackVectors"
        ]
    })
}

pub fn strengthen_prompt(text: &str) -> String {
    format!(
        "Act as a cryptographic security expert.\n\
         Target password: \"{text}\"\n\n\
         Strengthen this password significantly while keeping it memorable.\n\
         1. Keep the core: the user must still recognize the original word or idea.\n\
         2. Inject special characters, numbers and casing at strategic points.\n\
         3. Do not simply append \"123\" or \"!\" at the end.\n\
         4. The result must be practically uncrackable by standard brute force.\n\
         5. If the input is extremely weak, provide a strong but readable alternative.\n\n\
         Return strictly JSON: {{ \"boostedPassword\": \"...\", \"explanation\": \"...\" }}"
    )
}

pub fn strengthen_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "boostedPassword": { "type": "STRING", "description": "The new stronger password" },
            "explanation": { "type": "STRING", "description": "What changed, at most 15 words" }
        },
        "required": ["boostedPassword", "explanation"]
    })
}

pub fn suggest_prompt(text: &str) -> String {
    format!(
        "Analyze this password: \"{text}\".\n\
         Provide building blocks a user could add manually to strengthen it.\n\
         1. Suggest 4-5 special characters that fit the password.\n\
         2. Suggest 3-4 short numeric or text suffixes that increase entropy.\n\
         3. Suggest 3-4 leet speak substitutions for characters that appear in the password.\n\n\
         Return JSON."
    )
}

pub fn suggest_schema() -> Value {
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestedSymbols": strings.clone(),
            "suggestedSuffixes": strings.clone(),
            "leetspeak": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING" },
                        "replacement": { "type": "STRING" }
                    }
                }
            }
        }
    })
}
